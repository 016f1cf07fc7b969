use thiserror::Error;

#[derive(Error, Debug)]
pub enum VillageError {
    #[error("Unknown job: {0}")]
    UnknownJob(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("World snapshot error: {0}")]
    SnapshotError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, VillageError>;
