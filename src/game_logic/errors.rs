use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkirmishError {
    // Config-related errors
    #[error("Failed to read config file: {0}")]
    ConfigReadFailed(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Mesh-related errors
    #[error("Invalid grid spec: {reason}")]
    InvalidGridSpec { reason: String },
}

/// Result type alias for all operations
pub type SkirmishResult<T> = Result<T, SkirmishError>;
