use crate::error::Result;
use crate::video::{NewVideo, VideoId, VideoRecord};
use async_trait::async_trait;

/// A read-only view of a video repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing read paths to work against read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given video id.
    /// Returns `None` if the id does not exist.
    async fn find_by_id(&self, id: VideoId) -> Result<Option<VideoRecord>>;

    /// Returns every video record, ordered by id.
    async fn find_all(&self) -> Result<Vec<VideoRecord>>;

    /// Checks whether a video id exists in the repository.
    async fn exists(&self, id: VideoId) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Persists a new video record.
    ///
    /// The repository assigns the id and the creation timestamp; the
    /// record starts with an empty liker set.
    async fn create(&self, video: NewVideo) -> Result<VideoRecord>;

    /// Persists an updated record, replacing the stored state atomically
    /// (metadata and liker set together).
    ///
    /// Returns `Err(UnknownVideo)` if the id was never created. Creation
    /// only happens through [`create`](Self::create), which keeps ids
    /// store-assigned.
    async fn save(&self, video: &VideoRecord) -> Result<VideoRecord>;
}
