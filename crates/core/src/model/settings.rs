use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("points per item must be > 0")]
    InvalidPointsPerItem,

    #[error("time limit must be between 5 and 3600 seconds, got {0}")]
    InvalidTimeLimit(u32),

    #[error("flip-back delay must be between 100 and 10000 ms, got {0}")]
    InvalidFlipBackDelay(u32),
}

//
// ─── ADVANCE GATE ──────────────────────────────────────────────────────────────
//

/// When `advance()` is allowed for the current item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceGate {
    /// Only after the explanation has been revealed.
    #[default]
    RequireReveal,
    /// As soon as an answer is committed.
    RequireAnswer,
    /// Always; skipped items score nothing.
    Free,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Validated per-widget session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    points_per_item: u32,
    gate: AdvanceGate,
    shuffle: bool,
    time_limit_secs: Option<u32>,
    flip_back_delay_ms: u32,
}

impl SessionSettings {
    #[must_use]
    pub fn points_per_item(&self) -> u32 {
        self.points_per_item
    }

    #[must_use]
    pub fn gate(&self) -> AdvanceGate {
        self.gate
    }

    /// When true, items are shuffled at start and reshuffled on reset.
    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// `None` for untimed sessions.
    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.time_limit_secs
    }

    /// Delay before a mismatched memory-game pair turns face down again.
    #[must_use]
    pub fn flip_back_delay_ms(&self) -> u32 {
        self.flip_back_delay_ms
    }

    /// Editable copy, e.g. to layer config overrides on top.
    #[must_use]
    pub fn to_draft(&self) -> SessionSettingsDraft {
        SessionSettingsDraft {
            points_per_item: self.points_per_item,
            gate: self.gate,
            shuffle: self.shuffle,
            time_limit_secs: self.time_limit_secs,
            flip_back_delay_ms: self.flip_back_delay_ms,
        }
    }

    #[must_use]
    pub fn with_gate(mut self, gate: AdvanceGate) -> Self {
        self.gate = gate;
        self
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTimeLimit` outside 5..=3600 seconds.
    pub fn with_time_limit(mut self, secs: Option<u32>) -> Result<Self, SettingsError> {
        if let Some(secs) = secs {
            validate_time_limit(secs)?;
        }
        self.time_limit_secs = secs;
        Ok(self)
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            points_per_item: 1,
            gate: AdvanceGate::RequireReveal,
            shuffle: false,
            time_limit_secs: None,
            flip_back_delay_ms: 1000,
        }
    }
}

impl<'de> Deserialize<'de> for SessionSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        SessionSettingsDraft::deserialize(deserializer)?
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

/// Unvalidated settings as they come from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettingsDraft {
    pub points_per_item: u32,
    pub gate: AdvanceGate,
    pub shuffle: bool,
    pub time_limit_secs: Option<u32>,
    pub flip_back_delay_ms: u32,
}

impl Default for SessionSettingsDraft {
    fn default() -> Self {
        SessionSettings::default().to_draft()
    }
}

impl SessionSettingsDraft {
    /// # Errors
    ///
    /// Returns `SettingsError` if any value is out of range.
    pub fn validate(self) -> Result<SessionSettings, SettingsError> {
        if self.points_per_item == 0 {
            return Err(SettingsError::InvalidPointsPerItem);
        }
        if let Some(secs) = self.time_limit_secs {
            validate_time_limit(secs)?;
        }
        if !(100..=10_000).contains(&self.flip_back_delay_ms) {
            return Err(SettingsError::InvalidFlipBackDelay(self.flip_back_delay_ms));
        }

        Ok(SessionSettings {
            points_per_item: self.points_per_item,
            gate: self.gate,
            shuffle: self.shuffle,
            time_limit_secs: self.time_limit_secs,
            flip_back_delay_ms: self.flip_back_delay_ms,
        })
    }
}

fn validate_time_limit(secs: u32) -> Result<(), SettingsError> {
    if (5..=3600).contains(&secs) {
        Ok(())
    } else {
        Err(SettingsError::InvalidTimeLimit(secs))
    }
}
