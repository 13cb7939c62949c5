use async_trait::async_trait;
use jiff::Timestamp;
use reel_core::error::Result;
use reel_core::{
    NewVideo, ReadRepository, Repository, StorageError, Username, VideoId, VideoRecord,
};
use sqlx::{MySqlPool, Row};
use std::collections::{BTreeSet, HashMap};

/// MySQL implementation of the repository contract.
///
/// Video metadata lives in `videos`; the liker set lives in `video_likes`
/// with a composite primary key, which enforces the at-most-once set
/// semantics at the schema level. `save` replaces the like rows and
/// updates the metadata row in a single transaction, so the count and the
/// set can never be observed out of sync.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn likers_of(&self, id: VideoId) -> Result<BTreeSet<Username>> {
        let rows = sqlx::query(
            r#"
            SELECT username
            FROM video_likes
            WHERE video_id = ?
            "#,
        )
        .bind(id.as_u64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let name: String = row.try_get("username").map_err(map_sqlx_error)?;
                Ok(Username::new_unchecked(name))
            })
            .collect()
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn record_from_row(row: &sqlx::mysql::MySqlRow) -> Result<VideoRecord> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let duration_secs: u64 = row.try_get("duration_secs").map_err(map_sqlx_error)?;
    let content_type: String = row.try_get("content_type").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let created_at = parse_created_at(created_at_raw)?;

    Ok(VideoRecord::new(
        VideoId::new(id),
        NewVideo {
            title,
            url,
            duration_secs,
            content_type,
        },
        created_at,
    ))
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_id(&self, id: VideoId) -> Result<Option<VideoRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, duration_secs, content_type, created_at
            FROM videos
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_u64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = record_from_row(&row)?;
        let liked_by = self.likers_of(id).await?;

        Ok(Some(record.with_likers(liked_by)))
    }

    async fn find_all(&self) -> Result<Vec<VideoRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, url, duration_secs, content_type, created_at
            FROM videos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let like_rows = sqlx::query(
            r#"
            SELECT video_id, username
            FROM video_likes
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut likers: HashMap<u64, BTreeSet<Username>> = HashMap::new();
        for row in like_rows {
            let video_id: u64 = row.try_get("video_id").map_err(map_sqlx_error)?;
            let name: String = row.try_get("username").map_err(map_sqlx_error)?;
            likers
                .entry(video_id)
                .or_default()
                .insert(Username::new_unchecked(name));
        }

        rows.iter()
            .map(|row| {
                let record = record_from_row(row)?;
                let liked_by = likers.remove(&record.id.as_u64()).unwrap_or_default();
                Ok(record.with_likers(liked_by))
            })
            .collect()
    }

    async fn exists(&self, id: VideoId) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM videos
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_u64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn create(&self, video: NewVideo) -> Result<VideoRecord> {
        let created_at = Timestamp::now();

        let result = sqlx::query(
            r#"
            INSERT INTO videos (title, url, duration_secs, content_type, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&video.title)
        .bind(&video.url)
        .bind(video.duration_secs)
        .bind(&video.content_type)
        .bind(created_at.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = VideoId::new(result.last_insert_id());
        Ok(VideoRecord::new(id, video, created_at))
    }

    async fn save(&self, video: &VideoRecord) -> Result<VideoRecord> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Row lock on the metadata row; UPDATE alone reports zero affected
        // rows when nothing changed, so existence is checked explicitly.
        let existing = sqlx::query(
            r#"
            SELECT 1
            FROM videos
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(video.id.as_u64())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if existing.is_none() {
            return Err(StorageError::UnknownVideo(video.id));
        }

        sqlx::query(
            r#"
            UPDATE videos
            SET title = ?, url = ?, duration_secs = ?, content_type = ?
            WHERE id = ?
            "#,
        )
        .bind(&video.title)
        .bind(&video.url)
        .bind(video.duration_secs)
        .bind(&video.content_type)
        .bind(video.id.as_u64())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            DELETE FROM video_likes
            WHERE video_id = ?
            "#,
        )
        .bind(video.id.as_u64())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        for user in video.liked_by() {
            sqlx::query(
                r#"
                INSERT INTO video_likes (video_id, username)
                VALUES (?, ?)
                "#,
            )
            .bind(video.id.as_u64())
            .bind(user.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(video.clone())
    }
}
