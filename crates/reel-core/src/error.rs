use crate::username::Username;
use crate::video::VideoId;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("unknown video id: {0}")]
    UnknownVideo(VideoId),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Domain-level outcomes of catalog operations.
///
/// The first three variants are expected, recoverable-by-caller
/// conditions; `Storage` is the unrecoverable kind that wraps a
/// persistence failure.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("video not found: {0}")]
    NotFound(VideoId),
    #[error("user '{user}' has already liked video {id}")]
    AlreadyLiked { id: VideoId, user: Username },
    #[error("user '{user}' has not liked video {id}")]
    NotLiked { id: VideoId, user: Username },
    #[error("invalid username: {0}")]
    InvalidUsername(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
