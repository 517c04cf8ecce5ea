use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network failure: {0}")]
    Network(String),
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
