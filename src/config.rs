use crate::core::services::DEFAULT_MAX_TEXT_LENGTH;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// JSON files are kept here. Unset means records live in memory only.
    pub data_dir: Option<PathBuf>,
    pub max_text_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 3000,
            log_level: "info".to_string(),
            data_dir: None,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Config::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_text_length),
        }
    }
}
