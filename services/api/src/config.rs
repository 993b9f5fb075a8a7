use parlance_core::conversation::Proficiency;
use parlance_core::splitter::DEFAULT_MIN_WORD_LEN;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub catalog_path: PathBuf,
    pub source_language: String,
    pub display_language: String,
    pub proficiency: Proficiency,
    pub turn_count: usize,
    pub sentences_per_turn: usize,
    pub min_word_len: usize,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let catalog_path = std::env::var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/catalog"));

        let source_language = std::env::var("SOURCE_LANGUAGE")
            .unwrap_or_else(|_| "Brazilian Portuguese".to_string());
        let display_language =
            std::env::var("DISPLAY_LANGUAGE").unwrap_or_else(|_| "English".to_string());

        let proficiency_str =
            std::env::var("PROFICIENCY").unwrap_or_else(|_| "intermediate".to_string());
        let proficiency = proficiency_str
            .parse::<Proficiency>()
            .map_err(|e| ConfigError::InvalidValue("PROFICIENCY".to_string(), e.to_string()))?;

        let turn_count = parse_count("TURN_COUNT", 5)?;
        let sentences_per_turn = parse_count("SENTENCES_PER_TURN", 3)?;
        let min_word_len = parse_count("MIN_WORD_LEN", DEFAULT_MIN_WORD_LEN)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            catalog_path,
            source_language,
            display_language,
            proficiency,
            turn_count,
            sentences_per_turn,
            min_word_len,
            log_level,
        })
    }
}

/// Parses a positive count from the environment, falling back to `default`
/// when the variable is unset.
fn parse_count(var: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let value = raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue(var.to_string(), e.to_string()))?;
            if value == 0 {
                return Err(ConfigError::InvalidValue(
                    var.to_string(),
                    "must be at least 1".to_string(),
                ));
            }
            Ok(value)
        }
    }
}
