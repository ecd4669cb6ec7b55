use crate::model::ApplicationId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobtrackError {
    #[error("Application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, JobtrackError>;
