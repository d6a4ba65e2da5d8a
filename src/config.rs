//! Server configuration loaded from an optional TOML file.

use crate::session::DEFAULT_MAX_SESSIONS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use wordle_core::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_WORD_LENGTH, DEFAULT_WORDS, GameRules, Word, WordList,
};

/// Server and game configuration.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    cookie_name: String,

    /// Candidate secret words.
    #[serde(default = "default_words")]
    words: Vec<String>,

    /// Letters per word.
    #[serde(default = "default_word_length")]
    word_length: usize,

    /// Attempts after which a game is over.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Sessions kept in memory before the least recently used is evicted.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_word_length() -> usize {
    DEFAULT_WORD_LENGTH
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cookie_name: default_cookie_name(),
            words: default_words(),
            word_length: default_word_length(),
            max_attempts: default_max_attempts(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ServerConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        info!(
            words = config.words.len(),
            max_attempts = config.max_attempts,
            max_sessions = config.max_sessions,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Replaces the bind address.
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Checks the game parameters are usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_length == 0 {
            return Err(ConfigError::invalid("word_length", "must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("max_attempts", "must be positive"));
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::invalid("max_sessions", "must be positive"));
        }
        if self.words.is_empty() {
            return Err(ConfigError::invalid("words", "list is empty"));
        }
        if let Some(bad) = self
            .words
            .iter()
            .map(|w| Word::new(w))
            .find(|w| w.len() != self.word_length)
        {
            return Err(ConfigError::invalid(
                "words",
                format!("'{}' does not have {} letters", bad, self.word_length),
            ));
        }
        if self.cookie_name.is_empty()
            || !self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::invalid(
                "cookie_name",
                format!("'{}' is not a valid cookie name", self.cookie_name),
            ));
        }
        Ok(())
    }

    /// Game rules described by this configuration.
    pub fn rules(&self) -> GameRules {
        GameRules::new(self.word_length, self.max_attempts)
    }

    /// Uppercased word list.
    pub fn word_list(&self) -> Result<WordList, ConfigError> {
        WordList::new(self.words.iter().map(|w| Word::new(w)).collect())
            .ok_or_else(|| ConfigError::invalid("words", "list is empty"))
    }
}

/// Server configuration could not be loaded.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[display("Cannot read config file {path}: {source}")]
    Read {
        /// Path that was opened.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`ServerConfig`].
    #[display("Cannot parse config: {_0}")]
    Parse(toml::de::Error),
    /// A field holds an unusable value.
    #[display("Invalid config field '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(field, reason = %reason, "Rejected config");
        Self::Invalid { field, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.port(), &5000);
        assert_eq!(config.words().len(), 5);
        assert_eq!(config.rules(), GameRules::default());
    }

    #[test]
    fn words_are_uppercased() {
        let config = ServerConfig::from_toml(r#"words = ["crane", "slate"]"#).unwrap();
        let list = config.word_list().unwrap();
        assert_eq!(list.words()[0].as_str(), "CRANE");
    }

    #[test]
    fn rejects_mismatched_word_length() {
        let err = ServerConfig::from_toml(r#"words = ["crane", "cat"]"#).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { field: "words", ref reason } if reason.contains("CAT"))
        );
    }

    #[test]
    fn rejects_zero_attempts() {
        assert!(ServerConfig::from_toml("max_attempts = 0").is_err());
    }

    #[test]
    fn max_sessions_defaults_and_overrides() {
        assert_eq!(ServerConfig::default().max_sessions(), &DEFAULT_MAX_SESSIONS);
        let config = ServerConfig::from_toml("max_sessions = 20").unwrap();
        assert_eq!(config.max_sessions(), &20);
        let err = ServerConfig::from_toml("max_sessions = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_sessions", .. }));
    }

    #[test]
    fn rejects_empty_word_list() {
        assert!(ServerConfig::from_toml("words = []").is_err());
    }

    #[test]
    fn rejects_cookie_name_with_separator() {
        assert!(ServerConfig::from_toml(r#"cookie_name = "a;b""#).is_err());
    }

    #[test]
    fn cli_address_overrides_file() {
        let config = ServerConfig::default().with_address(None, Some(8080));
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), &8080);
    }
}
