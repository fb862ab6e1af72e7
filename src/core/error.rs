use thiserror::Error;

#[derive(Error, Debug)]
pub enum StealthError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Global config was already initialized")]
    ConfigAlreadyInitialized,

    #[error("Entity not registered: {0}")]
    UnknownEntity(crate::core::types::EntityId),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StealthError>;
