use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use reel_core::error::Result;
use reel_core::{
    NewVideo, ReadRepository, Repository, StorageError, VideoId, VideoRecord,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap uses sharded locks, so reads and writes to different buckets
/// proceed without blocking each other. `save` replaces the whole record
/// under its id in a single map-entry write, so a reader never observes a
/// half-updated record.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<VideoId, VideoRecord>,
    // Ids start at 1; 0 is reserved as "never a valid id".
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_id(&self, id: VideoId) -> Result<Option<VideoRecord>> {
        Ok(self.storage.get(&id).map(|entry| entry.clone()))
    }

    async fn find_all(&self) -> Result<Vec<VideoRecord>> {
        let mut records: Vec<VideoRecord> =
            self.storage.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn exists(&self, id: VideoId) -> Result<bool> {
        Ok(self.storage.contains_key(&id))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create(&self, video: NewVideo) -> Result<VideoRecord> {
        let id = VideoId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = VideoRecord::new(id, video, Timestamp::now());
        self.storage.insert(id, record.clone());
        Ok(record)
    }

    async fn save(&self, video: &VideoRecord) -> Result<VideoRecord> {
        let mut entry = self
            .storage
            .get_mut(&video.id)
            .ok_or(StorageError::UnknownVideo(video.id))?;
        *entry = video.clone();
        Ok(video.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::Username;

    fn video(title: &str) -> NewVideo {
        NewVideo {
            title: title.to_string(),
            url: format!("https://videos.example.com/{title}.mp4"),
            duration_secs: 120,
            content_type: "video/mp4".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.create(video("first")).await.unwrap();
        let second = repo.create(video("second")).await.unwrap();

        assert_eq!(first.id, VideoId::new(1));
        assert_eq!(second.id, VideoId::new(2));
        assert_eq!(first.likes(), 0);
    }

    #[tokio::test]
    async fn find_by_id_round_trip() {
        let repo = InMemoryRepository::new();

        let created = repo.create(video("clip")).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.find_by_id(VideoId::new(999)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn save_replaces_the_stored_record() {
        let repo = InMemoryRepository::new();

        let mut record = repo.create(video("clip")).await.unwrap();
        record.add_liker(Username::new_unchecked("alice"));
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.likes(), 1);
        assert!(found.has_liked(&Username::new_unchecked("alice")));
    }

    #[tokio::test]
    async fn save_unknown_id_fails() {
        let repo = InMemoryRepository::new();

        let record = VideoRecord::new(VideoId::new(999), video("ghost"), Timestamp::now());
        let err = repo.save(&record).await.unwrap_err();

        assert!(matches!(err, StorageError::UnknownVideo(_)));
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(VideoId::new(1)).await.unwrap());
        repo.create(video("clip")).await.unwrap();
        assert!(repo.exists(VideoId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = InMemoryRepository::new();

        for title in ["a", "b", "c"] {
            repo.create(video(title)).await.unwrap();
        }

        let records = repo.find_all().await.unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(video(&format!("clip-{i}"))).await.unwrap().id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 10);
    }
}
