use thiserror::Error;

use crate::models::CollectionStats;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB command failed: {0}")]
    Command(#[from] mongodb::error::Error),

    #[error("Failed to decode command response: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid connection URI: {0}")]
    InvalidUri(String),

    /// Stats for one collection could not be fetched. `completed` holds the
    /// records gathered before the failure, in listing order.
    #[error("Failed to collect stats for collection `{collection}`: {source}")]
    CollectionStats { collection: String, completed: Vec<CollectionStats>, source: Box<Error> },
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
