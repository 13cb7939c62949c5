use crate::error::CatalogError;
use crate::username::Username;
use crate::video::{NewVideo, VideoId, VideoRecord};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, CatalogError>;

/// The catalog operation set.
///
/// `like` and `unlike` drive the per-(video, user) state machine:
/// `NotLiked ⇄ Liked`, initial state `NotLiked`, cycling indefinitely.
/// The caller identity is always an explicit parameter; implementations
/// must not rely on ambient request context.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Persists a new video record with an empty like state.
    async fn add_video(&self, video: NewVideo) -> Result<VideoRecord>;

    /// Returns every video record in the catalog.
    async fn list_videos(&self) -> Result<Vec<VideoRecord>>;

    /// Looks up a video record by id.
    ///
    /// Fails with `NotFound` if the id has no record; an absent record is
    /// never forwarded to the caller.
    async fn get_video(&self, id: VideoId) -> Result<VideoRecord>;

    /// Records that `user` likes the video.
    ///
    /// Fails with `NotFound` if the video does not exist and with
    /// `AlreadyLiked` if `user` already likes it; in both cases no state
    /// changes. Repeated calls never double-count.
    async fn like(&self, id: VideoId, user: &Username) -> Result<()>;

    /// Removes `user`'s like from the video.
    ///
    /// Fails with `NotFound` if the video does not exist and with
    /// `NotLiked` if `user` does not currently like it; in both cases no
    /// state changes.
    async fn unlike(&self, id: VideoId, user: &Username) -> Result<()>;

    /// Users who have liked the video, in deterministic (lexicographic)
    /// order, without duplicates.
    ///
    /// Fails with `NotFound` if the video does not exist.
    async fn likers(&self, id: VideoId) -> Result<Vec<Username>>;
}
