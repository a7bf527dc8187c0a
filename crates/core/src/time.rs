use chrono::{DateTime, Utc};

/// Where session start/finish stamps come from.
///
/// Countdowns are driven by ticks; the clock never decides when a timed
/// session ends.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// 2023-11-14T22:13:20Z, used wherever a reproducible stamp is needed.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Never in practice; the constant is within chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("constant timestamp is representable")
}

/// A clock frozen at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::Fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), FIXED_TEST_TIMESTAMP);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = Clock::System;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
