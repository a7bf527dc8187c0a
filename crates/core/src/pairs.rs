//! Memory game: flip two cards, keep them if their categories match.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::model::CardId;
use crate::shuffle::Shuffler;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairsError {
    #[error("memory game needs at least one pair of cards")]
    Empty,

    #[error("duplicate card id {0}")]
    DuplicateCardId(CardId),

    #[error("category {0:?} has an odd number of cards")]
    UnpairedCategory(String),
}

//
// ─── CARDS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    id: CardId,
    label: String,
    category: String,
}

impl MemoryCard {
    #[must_use]
    pub fn new(id: CardId, label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            category: category.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Two cards match when their categories are equal.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    FaceUp,
    Matched,
}

/// Handle for the deferred flip-back of a mismatched pair.
///
/// Carries the board generation so a flip-back scheduled before a reset
/// does nothing afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipBackToken {
    generation: u64,
    first: usize,
    second: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownCard,
    AlreadyMatched,
    AlreadyFaceUp,
    /// Two mismatched cards are still face up.
    AwaitingFlipBack,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The click was a no-op.
    Ignored(IgnoreReason),
    /// First card of a pair turned face up.
    Flipped(CardId),
    Matched { first: CardId, second: CardId },
    /// Categories differ; call [`MatchingPairs::flip_back`] with the token
    /// after the flip-back delay.
    Mismatched { token: FlipBackToken },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Empty,
    One(usize),
    Pending(FlipBackToken),
}

//
// ─── GAME ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct MatchingPairs {
    cards: Vec<MemoryCard>,
    faces: Vec<CardFace>,
    selection: Selection,
    score: u32,
    moves: u32,
    generation: u64,
    shuffler: Option<Shuffler>,
}

impl MatchingPairs {
    /// # Errors
    ///
    /// Returns `PairsError` if there are no cards, ids repeat, or a category
    /// cannot be fully paired.
    pub fn new(cards: Vec<MemoryCard>) -> Result<Self, PairsError> {
        if cards.is_empty() {
            return Err(PairsError::Empty);
        }
        let mut seen = HashSet::new();
        let mut per_category: HashMap<&str, usize> = HashMap::new();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(PairsError::DuplicateCardId(card.id));
            }
            *per_category.entry(card.category.as_str()).or_default() += 1;
        }
        let mut odd: Vec<&str> = per_category
            .iter()
            .filter(|(_, count)| **count % 2 != 0)
            .map(|(category, _)| *category)
            .collect();
        odd.sort_unstable();
        if let Some(category) = odd.first() {
            return Err(PairsError::UnpairedCategory((*category).to_string()));
        }

        let faces = vec![CardFace::Hidden; cards.len()];
        Ok(Self {
            cards,
            faces,
            selection: Selection::Empty,
            score: 0,
            moves: 0,
            generation: 0,
            shuffler: None,
        })
    }

    /// Builds two cards per `(term, definition)` pair, matched by term.
    ///
    /// # Errors
    ///
    /// Returns `PairsError::Empty` for no pairs and
    /// `PairsError::UnpairedCategory` if a term repeats.
    pub fn from_pairs<T, D>(pairs: impl IntoIterator<Item = (T, D)>) -> Result<Self, PairsError>
    where
        T: Into<String>,
        D: Into<String>,
    {
        let mut cards = Vec::new();
        let mut next_id = 1_u64;
        for (term, definition) in pairs {
            let term = term.into();
            cards.push(MemoryCard::new(CardId::new(next_id), term.clone(), term.clone()));
            cards.push(MemoryCard::new(CardId::new(next_id + 1), definition, term));
            next_id += 2;
        }
        Self::new(cards)
    }

    /// Attach a random source; the board is shuffled now and on every reset.
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = Some(shuffler);
        self.reset();
        self
    }

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    #[must_use]
    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    #[must_use]
    pub fn face_of(&self, id: CardId) -> Option<CardFace> {
        self.position(id).map(|pos| self.faces[pos])
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.cards.len() / 2).unwrap_or(u32::MAX)
    }

    /// Completed pair attempts, matched or not.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.faces.iter().all(|face| *face == CardFace::Matched)
    }

    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.faces
            .iter()
            .filter(|face| **face != CardFace::Matched)
            .count()
    }

    /// Token of the pair waiting to be flipped back, if any.
    #[must_use]
    pub fn pending_flip_back(&self) -> Option<FlipBackToken> {
        match self.selection {
            Selection::Pending(token) => Some(token),
            _ => None,
        }
    }

    /// Turn the card with `id` face up.
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        match self.position(id) {
            Some(pos) => self.select_at(pos),
            None => SelectOutcome::Ignored(IgnoreReason::UnknownCard),
        }
    }

    /// Turn the card at board `position` face up.
    pub fn select_at(&mut self, position: usize) -> SelectOutcome {
        if self.is_complete() {
            return SelectOutcome::Ignored(IgnoreReason::Completed);
        }
        let Some(face) = self.faces.get(position).copied() else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        let first = match self.selection {
            Selection::Pending(_) => {
                return SelectOutcome::Ignored(IgnoreReason::AwaitingFlipBack);
            }
            Selection::Empty => None,
            Selection::One(first) => Some(first),
        };
        match face {
            CardFace::Matched => return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched),
            CardFace::FaceUp => return SelectOutcome::Ignored(IgnoreReason::AlreadyFaceUp),
            CardFace::Hidden => {}
        }

        self.faces[position] = CardFace::FaceUp;
        let Some(first) = first else {
            self.selection = Selection::One(position);
            return SelectOutcome::Flipped(self.cards[position].id);
        };

        self.moves = self.moves.saturating_add(1);
        if self.cards[first].category == self.cards[position].category {
            self.faces[first] = CardFace::Matched;
            self.faces[position] = CardFace::Matched;
            self.score = self.score.saturating_add(1);
            self.selection = Selection::Empty;
            SelectOutcome::Matched {
                first: self.cards[first].id,
                second: self.cards[position].id,
            }
        } else {
            let token = FlipBackToken {
                generation: self.generation,
                first,
                second: position,
            };
            self.selection = Selection::Pending(token);
            SelectOutcome::Mismatched { token }
        }
    }

    /// Hide a mismatched pair again.
    ///
    /// Returns `false` when the token is stale (the board was reset, or the
    /// pair was already flipped back).
    pub fn flip_back(&mut self, token: FlipBackToken) -> bool {
        if token.generation != self.generation || self.selection != Selection::Pending(token) {
            return false;
        }
        self.faces[token.first] = CardFace::Hidden;
        self.faces[token.second] = CardFace::Hidden;
        self.selection = Selection::Empty;
        true
    }

    /// Hide every card, clear score and moves, and reshuffle if configured.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(shuffler) = self.shuffler.as_mut() {
            shuffler.shuffle(&mut self.cards);
        }
        self.faces.iter_mut().for_each(|face| *face = CardFace::Hidden);
        self.selection = Selection::Empty;
        self.score = 0;
        self.moves = 0;
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> MatchingPairs {
        MatchingPairs::from_pairs([
            ("Objective", "What is optimized"),
            ("Constraint", "Limits the choices"),
            ("Slack", "Unused resource"),
            ("Gradient", "Steepest ascent"),
        ])
        .unwrap()
    }

    fn ids_by_category(game: &MatchingPairs) -> HashMap<String, Vec<CardId>> {
        let mut map: HashMap<String, Vec<CardId>> = HashMap::new();
        for card in game.cards() {
            map.entry(card.category().to_string()).or_default().push(card.id());
        }
        map
    }

    #[test]
    fn eight_card_game_completes_in_four_moves() {
        let mut game = board().with_shuffler(Shuffler::seeded(5));
        let pairs = ids_by_category(&game);

        for ids in pairs.values() {
            assert!(matches!(game.select(ids[0]), SelectOutcome::Flipped(_)));
            assert!(matches!(game.select(ids[1]), SelectOutcome::Matched { .. }));
        }

        assert_eq!(game.score(), 4);
        assert_eq!(game.moves(), 4);
        assert_eq!(game.unmatched(), 0);
        assert!(game.is_complete());
        assert_eq!(game.score(), game.max_score());
    }

    #[test]
    fn mismatch_flips_back_and_keeps_score() {
        let mut game = board();
        let first = game.cards()[0].id();
        let other_category = game.cards()[2].id();

        game.select(first);
        let SelectOutcome::Mismatched { token } = game.select(other_category) else {
            panic!("expected mismatch");
        };
        assert_eq!(game.face_of(first), Some(CardFace::FaceUp));
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 1);

        assert!(game.flip_back(token));
        assert_eq!(game.face_of(first), Some(CardFace::Hidden));
        assert_eq!(game.face_of(other_category), Some(CardFace::Hidden));
        assert!(!game.flip_back(token));
    }

    #[test]
    fn clicks_while_two_cards_face_up_are_ignored() {
        let mut game = board();
        game.select_at(0);
        game.select_at(2);
        assert_eq!(
            game.select_at(1),
            SelectOutcome::Ignored(IgnoreReason::AwaitingFlipBack)
        );
        assert_eq!(game.faces()[1], CardFace::Hidden);
    }

    #[test]
    fn matched_and_face_up_cards_are_ignored() {
        let mut game = board();
        game.select_at(0);
        assert_eq!(
            game.select_at(0),
            SelectOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        game.select_at(1);
        assert_eq!(
            game.select_at(0),
            SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );
        assert_eq!(game.moves(), 1);
        assert_eq!(
            game.select(CardId::new(999)),
            SelectOutcome::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn stale_flip_back_after_reset_is_ignored() {
        let mut game = board();
        game.select_at(0);
        let SelectOutcome::Mismatched { token } = game.select_at(2) else {
            panic!("expected mismatch");
        };
        game.reset();
        game.select_at(0);
        assert!(!game.flip_back(token));
        assert_eq!(game.faces()[0], CardFace::FaceUp);
    }

    #[test]
    fn reset_hides_everything() {
        let mut game = board();
        game.select_at(0);
        game.select_at(1);
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
        assert!(game.faces().iter().all(|f| *f == CardFace::Hidden));
        assert_eq!(game.pending_flip_back(), None);
    }

    #[test]
    fn invalid_boards_are_rejected() {
        assert_eq!(MatchingPairs::new(Vec::new()).unwrap_err(), PairsError::Empty);

        let odd = vec![
            MemoryCard::new(CardId::new(1), "a", "x"),
            MemoryCard::new(CardId::new(2), "b", "x"),
            MemoryCard::new(CardId::new(3), "c", "y"),
        ];
        assert_eq!(
            MatchingPairs::new(odd).unwrap_err(),
            PairsError::UnpairedCategory("y".to_string())
        );

        let dup = vec![
            MemoryCard::new(CardId::new(1), "a", "x"),
            MemoryCard::new(CardId::new(1), "b", "x"),
        ];
        assert_eq!(
            MatchingPairs::new(dup).unwrap_err(),
            PairsError::DuplicateCardId(CardId::new(1))
        );
    }
}
