use thiserror::Error;

#[derive(Error, Debug)]
pub enum MendError {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Targeting failed: {0}")]
    TargetingFailed(String),

    #[error("Cast failed: {0}")]
    CastFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Profile parse error: {0}")]
    ProfileParseError(#[from] toml::de::Error),

    #[error("Profile encode error: {0}")]
    ProfileEncodeError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MendError>;
