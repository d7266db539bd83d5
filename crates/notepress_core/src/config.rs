//! Process-wide configuration, loaded once and passed explicitly.
//!
//! # Responsibility
//! - Deserialize configuration from JSON with defaults for missing fields.
//! - Validate values before any service is built from them.
//!
//! # Invariants
//! - A `CoreConfig` is immutable after `load`/`from_json_str` returns.
//! - Services receive configuration by reference; nothing reads it globally.

use crate::filter::BannedWords;
use crate::logging::LoggingConfig;
use crate::routes::LOGIN_PATH;
use crate::slug::DEFAULT_SLUG_MAX_LENGTH;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Number of news items shown on the home page.
pub const DEFAULT_NEWS_PAGE_SIZE: u32 = 10;

/// Core configuration shared by the notes and news services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Substrings that make comment text invalid.
    pub banned_words: BannedWords,
    /// Home page cap; older items are not listed at all.
    pub news_page_size: u32,
    /// Cap for slugs derived from note titles.
    pub slug_max_length: usize,
    /// Authentication entry point used in login redirects.
    pub login_path: String,
    /// SQLite file. `None` means an in-memory database.
    pub database_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            banned_words: BannedWords::default(),
            news_page_size: DEFAULT_NEWS_PAGE_SIZE,
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
            login_path: LOGIN_PATH.to_string(),
            database_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates configuration from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        let config = Self::from_json_str(&source)?;
        info!(
            "event=config_load module=config status=ok path={} banned_words={} news_page_size={}",
            path.display(),
            config.banned_words.len(),
            config.news_page_size
        );
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.news_page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "news_page_size",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.slug_max_length == 0 {
            return Err(ConfigError::Invalid {
                field: "slug_max_length",
                message: "must be greater than zero".to_string(),
            });
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "login_path",
                message: format!("must be an absolute path, got `{}`", self.login_path),
            });
        }
        self.logging
            .validate()
            .map_err(|message| ConfigError::Invalid {
                field: "logging",
                message,
            })
    }
}

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::Invalid { field, message } => write!(f, "invalid config `{field}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_NEWS_PAGE_SIZE};
    use crate::filter::DEFAULT_BANNED_WORDS;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("defaults should validate");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.news_page_size, DEFAULT_NEWS_PAGE_SIZE);
        assert_eq!(config.slug_max_length, 100);
        assert_eq!(config.login_path, "/auth/login/");
        assert_eq!(config.banned_words.len(), DEFAULT_BANNED_WORDS.len());
    }

    #[test]
    fn overrides_banned_words_and_page_size() {
        let config = CoreConfig::from_json_str(
            r#"{ "banned_words": ["слив"], "news_page_size": 5 }"#,
        )
        .expect("valid config");
        assert_eq!(config.banned_words.as_slice().to_vec(), vec!["слив".to_string()]);
        assert_eq!(config.news_page_size, 5);
    }

    #[test]
    fn rejects_blank_banned_word() {
        let err = CoreConfig::from_json_str(r#"{ "banned_words": ["ok", " "] }"#)
            .expect_err("blank banned word must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = CoreConfig::from_json_str(r#"{ "news_page_size": 0 }"#)
            .expect_err("zero page size must fail");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "news_page_size",
                ..
            }
        ));
    }

    #[test]
    fn rejects_relative_login_path() {
        let err = CoreConfig::from_json_str(r#"{ "login_path": "auth/login/" }"#)
            .expect_err("relative login path must fail");
        assert!(err.to_string().contains("login_path"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = CoreConfig::from_json_str(r#"{ "page_size": 3 }"#)
            .expect_err("unknown field must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CoreConfig::load(dir.path().join("missing.json")).expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
