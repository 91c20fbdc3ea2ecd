//! Error types for the slot engine

use thiserror::Error;

use lr_stage::FeatureKind;

/// Why a spin request was refused.
///
/// Refusals leave the session untouched; callers are free to ignore them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpinRejection {
    #[error("A spin is already in progress")]
    AlreadySpinning,

    #[error("{0} is active")]
    FeatureActive(FeatureKind),

    #[error("Insufficient balance: {balance} < bet {bet}")]
    InsufficientBalance { balance: i64, bet: u64 },

    #[error("Session is over, waiting for reset")]
    GameOver,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
