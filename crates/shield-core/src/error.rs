use thiserror::Error;

/// Top-level error type for the Desert Shield crates.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for ShieldError` so that `?` works across crate
/// boundaries (the CLI only ever sees this type).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShieldError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image intake error: {0}")]
    Intake(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ShieldError {
    fn from(err: toml::de::Error) -> Self {
        ShieldError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShieldError {
    fn from(err: serde_json::Error) -> Self {
        ShieldError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Desert Shield operations.
pub type Result<T> = std::result::Result<T, ShieldError>;
