use thiserror::Error;

pub type MarketingResult<T> = Result<T, MarketingError>;

#[derive(Error, Debug)]
pub enum MarketingError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("Invalid {resource} transition: {from} -> {to}")]
    InvalidTransition {
        resource: &'static str,
        from: String,
        to: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
