use crate::username::Username;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// A unique identifier for a video record.
///
/// Ids are assigned by the persistence layer at creation time and are
/// stable for the lifetime of the record.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VideoId(u64);

impl VideoId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VideoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for VideoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Caller-supplied metadata for creating a video record.
///
/// All fields are opaque to the core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub duration_secs: u64,
    pub content_type: String,
}

/// A persisted video record with its like state.
///
/// The like count is derived: it is always the cardinality of the liker
/// set, so it cannot be set independently and cannot drift out of sync.
/// The liker set is ordered, which makes liker listings deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: String,
    pub url: String,
    pub duration_secs: u64,
    pub content_type: String,
    pub created_at: Timestamp,
    liked_by: BTreeSet<Username>,
}

impl VideoRecord {
    /// Creates a record with an empty liker set.
    pub fn new(id: VideoId, video: NewVideo, created_at: Timestamp) -> Self {
        Self {
            id,
            title: video.title,
            url: video.url,
            duration_secs: video.duration_secs,
            content_type: video.content_type,
            created_at,
            liked_by: BTreeSet::new(),
        }
    }

    /// Replaces the liker set, used when restoring a record from storage.
    pub fn with_likers(mut self, liked_by: BTreeSet<Username>) -> Self {
        self.liked_by = liked_by;
        self
    }

    /// Number of likes. Always equals the size of the liker set.
    pub fn likes(&self) -> u64 {
        self.liked_by.len() as u64
    }

    /// Whether `user` has liked this video.
    pub fn has_liked(&self, user: &Username) -> bool {
        self.liked_by.contains(user)
    }

    /// Inserts `user` into the liker set.
    ///
    /// Returns `true` if the set changed. The coordinator checks
    /// [`has_liked`](Self::has_liked) first, so a `false` return indicates
    /// a skipped precondition.
    pub fn add_liker(&mut self, user: Username) -> bool {
        self.liked_by.insert(user)
    }

    /// Removes `user` from the liker set.
    ///
    /// Returns `true` if the set changed.
    pub fn remove_liker(&mut self, user: &Username) -> bool {
        self.liked_by.remove(user)
    }

    /// Likers in lexicographic order.
    pub fn liked_by(&self) -> impl Iterator<Item = &Username> + '_ {
        self.liked_by.iter()
    }
}
