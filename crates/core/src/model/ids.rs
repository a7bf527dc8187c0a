use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a question, puzzle or other session item.
    ItemId
);

numeric_id!(
    /// Identifier of a memory-game card.
    ///
    /// Stable across reshuffles, unlike the card's position on the board.
    CardId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_hash_prefix() {
        assert_eq!(ItemId::new(42).to_string(), "#42");
        assert_eq!(CardId::new(7).value(), 7);
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&ItemId::new(3)).unwrap(), "3");
        let card: CardId = serde_json::from_str("11").unwrap();
        assert_eq!(card, CardId::new(11));
    }
}
