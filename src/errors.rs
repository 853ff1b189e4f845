use buddy_config::ConfigError;
use buddy_core::CoreError;
use thiserror::Error;

/// Top-level failure reported by the CLI.
#[derive(Debug, Error)]
pub enum BuddyError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
