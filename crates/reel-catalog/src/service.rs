use async_trait::async_trait;
use dashmap::DashMap;
use reel_core::{
    Catalog, CatalogError, NewVideo, Repository, Username, VideoId, VideoRecord,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, CatalogError>;

/// A concrete implementation of the `Catalog` trait.
///
/// This service wraps a `Repository` and enforces the like-state rules:
/// - existence checks before every operation (an absent record
///   short-circuits to `NotFound`, it is never forwarded)
/// - idempotency guards (`AlreadyLiked` / `NotLiked`) before any mutation
/// - the derived like count always matching the liker set
///
/// Mutating operations are serialized per video id, so the
/// load-check-mutate-save window cannot interleave for the same record.
/// Reads take no lock and observe some persisted snapshot.
#[derive(Debug)]
pub struct CatalogService<R> {
    repository: Arc<R>,
    // One entry per id ever mutated; entries are tiny and never reclaimed.
    write_locks: DashMap<VideoId, Arc<Mutex<()>>>,
}

impl<R: Repository> CatalogService<R> {
    /// Creates a new `CatalogService` backed by the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            write_locks: DashMap::new(),
        }
    }

    fn write_lock(&self, id: VideoId) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load(&self, id: VideoId) -> Result<VideoRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}

#[async_trait]
impl<R: Repository> Catalog for CatalogService<R> {
    async fn add_video(&self, video: NewVideo) -> Result<VideoRecord> {
        let record = self.repository.create(video).await?;
        debug!(id = %record.id, title = %record.title, "created video record");
        Ok(record)
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        Ok(self.repository.find_all().await?)
    }

    async fn get_video(&self, id: VideoId) -> Result<VideoRecord> {
        trace!(id = %id, "looking up video");
        self.load(id).await
    }

    async fn like(&self, id: VideoId, user: &Username) -> Result<()> {
        let lock = self.write_lock(id);
        let _guard = lock.lock().await;

        let mut record = self.load(id).await?;
        if record.has_liked(user) {
            return Err(CatalogError::AlreadyLiked {
                id,
                user: user.clone(),
            });
        }

        record.add_liker(user.clone());
        self.repository.save(&record).await?;
        debug!(id = %id, user = %user, likes = record.likes(), "recorded like");
        Ok(())
    }

    async fn unlike(&self, id: VideoId, user: &Username) -> Result<()> {
        let lock = self.write_lock(id);
        let _guard = lock.lock().await;

        let mut record = self.load(id).await?;
        if !record.has_liked(user) {
            return Err(CatalogError::NotLiked {
                id,
                user: user.clone(),
            });
        }

        record.remove_liker(user);
        self.repository.save(&record).await?;
        debug!(id = %id, user = %user, likes = record.likes(), "removed like");
        Ok(())
    }

    async fn likers(&self, id: VideoId) -> Result<Vec<Username>> {
        let record = self.load(id).await?;
        Ok(record.liked_by().cloned().collect())
    }
}
