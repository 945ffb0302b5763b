use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::quiz::session::SessionSettings;
use crate::quiz::{Language, Level};

#[derive(Debug, Clone)]
pub struct Config {
    /// Length of one game
    pub round_seconds: u32,
    /// Options shown per round, the correct one included
    pub option_count: usize,
    /// Pause between a correct answer and the next word
    pub advance_delay: Duration,
    pub default_level: Level,
    pub default_language: Language,
    /// Directory with a1.json, a2.json and verbs.json replacing the bundled lists
    pub catalog_dir: Option<PathBuf>,
    /// Fixed seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_seconds: 120,
            option_count: 5,
            advance_delay: Duration::from_millis(200),
            default_level: Level::A1,
            default_language: Language::English,
            catalog_dir: None,
            seed: None,
        }
    }
}

impl Config {
    /// Reads the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let round_seconds = parse_var(&lookup, "ROUND_SECONDS")?.unwrap_or(defaults.round_seconds);
        if round_seconds == 0 {
            return Err(invalid("ROUND_SECONDS", "0"));
        }

        let option_count = parse_var(&lookup, "OPTION_COUNT")?.unwrap_or(defaults.option_count);
        if option_count < 2 {
            return Err(invalid("OPTION_COUNT", &option_count.to_string()));
        }

        let advance_delay = parse_var(&lookup, "ADVANCE_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.advance_delay);

        Ok(Self {
            round_seconds,
            option_count,
            advance_delay,
            default_level: parse_var(&lookup, "DEFAULT_LEVEL")?.unwrap_or(defaults.default_level),
            default_language: parse_var(&lookup, "DEFAULT_LANGUAGE")?
                .unwrap_or(defaults.default_language),
            catalog_dir: lookup("CATALOG_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            seed: parse_var(&lookup, "QUIZ_SEED")?,
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            round_seconds: self.round_seconds,
            option_count: self.option_count,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, &value)),
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}
