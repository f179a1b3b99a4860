use std::path::PathBuf;

use thiserror::Error;
use tracing::Level;

pub const SEED_VAR: &str = "DUEL_SEED";
pub const LOG_LEVEL_VAR: &str = "DUEL_LOG";
pub const LOG_JSON_VAR: &str = "DUEL_LOG_JSON";
pub const REPORT_VAR: &str = "DUEL_REPORT";

/// Runtime options. The game itself takes no arguments; everything here is
/// optional and read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub logging: LoggingConfig,
    pub report_path: Option<PathBuf>,
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_reader<F>(mut read: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let seed = match non_empty(read(SEED_VAR)) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|err| ConfigError::InvalidVar {
                var: SEED_VAR,
                message: format!("'{raw}' is not an unsigned 64-bit seed ({err})"),
            })?),
            None => None,
        };

        let mut logging = LoggingConfig::default();
        if let Some(level) = non_empty(read(LOG_LEVEL_VAR)) {
            logging.tracing_level = level;
        }
        if logging.level().is_none() {
            return Err(ConfigError::InvalidVar {
                var: LOG_LEVEL_VAR,
                message: format!(
                    "unknown level '{}'; expected trace, debug, info, warn or error",
                    logging.tracing_level
                ),
            });
        }
        if let Some(raw) = non_empty(read(LOG_JSON_VAR)) {
            logging.json = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidVar {
                var: LOG_JSON_VAR,
                message: format!("'{raw}' is not a boolean flag"),
            })?;
        }

        let report_path = non_empty(read(REPORT_VAR)).map(PathBuf::from);

        Ok(Self {
            seed,
            logging,
            report_path,
        })
    }

    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Logging defaults to plain-text warnings and errors on stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub tracing_level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}
