/// Errors raised by key-value store backends and repositories.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Redis transport or protocol failure.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A stored value exists but does not have the expected shape.
    #[error("Corrupt value at '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// `STORE_URL` names a backend this build does not support.
    #[error("Unsupported store URL: {0}")]
    UnsupportedUrl(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
