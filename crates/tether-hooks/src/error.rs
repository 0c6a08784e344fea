use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("could not encode value: {0}")]
    Serialize(#[from] serde_json::Error),
}
