//! Engine configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default leaderboard size.
pub const DEFAULT_TOP_ATHLETES: usize = 10;

/// Engine configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input snapshot path
    pub input_path: Option<PathBuf>,
    /// Report path (unset: stdout)
    pub output_path: Option<PathBuf>,
    /// Leaderboard bound
    pub top_athletes: usize,
    /// Whether campaign reports are memoized
    pub cache_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            top_athletes: DEFAULT_TOP_ATHLETES,
            cache_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let top_athletes = match env::var("PACEFUND_TOP_ATHLETES") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PACEFUND_TOP_ATHLETES",
                value: v.clone(),
            })?,
            Err(_) => DEFAULT_TOP_ATHLETES,
        };

        let cache_enabled = match env::var("PACEFUND_CACHE") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                name: "PACEFUND_CACHE",
                value: v.clone(),
            })?,
            Err(_) => true,
        };

        Ok(Self {
            input_path: env::var("PACEFUND_INPUT").ok().map(PathBuf::from),
            output_path: env::var("PACEFUND_OUTPUT").ok().map(PathBuf::from),
            top_athletes,
            cache_enabled,
        })
    }

    /// Input path, required before a run.
    pub fn require_input(&self) -> Result<&PathBuf, ConfigError> {
        self.input_path
            .as_ref()
            .ok_or(ConfigError::Missing("PACEFUND_INPUT"))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
