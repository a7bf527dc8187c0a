//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <path>` (must exist)
//! 2. `$PRACTICE_CONFIG`
//! 3. `./practice.toml`
//! 4. Built-in defaults (everything is optional)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use practice_core::model::{AdvanceGate, SessionSettings, SettingsError};
use services::{CatalogError, Widget};

pub const CONFIG_ENV: &str = "PRACTICE_CONFIG";
const LOCAL_CONFIG: &str = "practice.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget slug used when `--widget` is not given.
    pub widget: Option<String>,
    /// Seed for shuffled widgets. Default: fresh entropy per run.
    pub seed: Option<u64>,
    pub session: SessionOverrides,
}

/// Overrides layered on top of a widget's default settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionOverrides {
    pub points_per_item: Option<u32>,
    pub gate: Option<AdvanceGate>,
    pub shuffle: Option<bool>,
    /// `0` turns the countdown off.
    pub time_limit_secs: Option<u32>,
    pub flip_back_delay_ms: Option<u32>,
}

impl Config {
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownWidget` for an unknown slug.
    pub fn widget(&self) -> Result<Option<Widget>, CatalogError> {
        self.widget.as_deref().map(str::parse).transpose()
    }
}

impl SessionOverrides {
    /// # Errors
    ///
    /// Returns `SettingsError` if an override is out of range.
    pub fn apply(&self, base: SessionSettings) -> Result<SessionSettings, SettingsError> {
        let mut draft = base.to_draft();
        if let Some(points) = self.points_per_item {
            draft.points_per_item = points;
        }
        if let Some(gate) = self.gate {
            draft.gate = gate;
        }
        if let Some(shuffle) = self.shuffle {
            draft.shuffle = shuffle;
        }
        if let Some(secs) = self.time_limit_secs {
            draft.time_limit_secs = (secs > 0).then_some(secs);
        }
        if let Some(delay) = self.flip_back_delay_ms {
            draft.flip_back_delay_ms = delay;
        }
        draft.validate()
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let path = config_path(std::env::var_os(CONFIG_ENV));
    if path.exists() {
        read_config(&path)
    } else {
        Ok(Config::default())
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// `$PRACTICE_CONFIG` when set, else `./practice.toml`.
fn config_path(from_env: Option<OsString>) -> PathBuf {
    from_env.map_or_else(|| PathBuf::from(LOCAL_CONFIG), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_path_prefers_the_environment() {
        assert_eq!(config_path(None), PathBuf::from(LOCAL_CONFIG));
        assert_eq!(
            config_path(Some(OsString::from("/etc/practice.toml"))),
            PathBuf::from("/etc/practice.toml")
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.widget.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.session, SessionOverrides::default());
    }

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            widget = "super-brain"
            seed = 7

            [session]
            points_per_item = 2
            gate = "require_answer"
            time_limit_secs = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.widget().unwrap(), Some(Widget::SuperBrainGame));
        assert_eq!(config.seed, Some(7));

        let settings = config
            .session
            .apply(Widget::SuperBrainGame.default_settings().unwrap())
            .unwrap();
        assert_eq!(settings.points_per_item(), 2);
        assert_eq!(settings.gate(), AdvanceGate::RequireAnswer);
        assert_eq!(settings.time_limit_secs(), Some(90));
        assert!(settings.shuffle());
    }

    #[test]
    fn zero_time_limit_disables_countdown() {
        let overrides = SessionOverrides {
            time_limit_secs: Some(0),
            ..SessionOverrides::default()
        };
        let settings = overrides
            .apply(Widget::SuperBrainGame.default_settings().unwrap())
            .unwrap();
        assert_eq!(settings.time_limit_secs(), None);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let overrides = SessionOverrides {
            flip_back_delay_ms: Some(5),
            ..SessionOverrides::default()
        };
        assert_eq!(
            overrides.apply(SessionSettings::default()),
            Err(SettingsError::InvalidFlipBackDelay(5))
        );
    }

    #[test]
    fn unknown_widget_in_config_is_an_error() {
        let config: Config = toml::from_str(r#"widget = "chess""#).unwrap();
        assert!(config.widget().is_err());
    }

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 3\n[session]\nshuffle = true").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.session.shuffle, Some(true));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"many\"").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }
}
