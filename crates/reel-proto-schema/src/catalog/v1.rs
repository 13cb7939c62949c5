use std::collections::BTreeSet;
use std::convert::TryInto;
use thiserror::Error;
use reel_core as core;
use reel_core::{NewVideo, Username, VideoId};

tonic::include_proto!("catalog.v1");

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("video record is malformed: {0}")]
    MalformedRecord(String),
}

impl From<&core::VideoRecord> for Video {
    fn from(record: &core::VideoRecord) -> Self {
        Video {
            id: record.id.as_u64(),
            title: record.title.clone(),
            url: record.url.clone(),
            duration_secs: record.duration_secs,
            content_type: record.content_type.clone(),
            created_at: record.created_at.as_second(),
            likes: record.likes(),
            liked_by: record
                .liked_by()
                .map(|user| user.as_str().to_owned())
                .collect(),
        }
    }
}

impl TryInto<core::VideoRecord> for &Video {
    type Error = ConversionError;

    fn try_into(self) -> Result<core::VideoRecord, Self::Error> {
        let created_at = jiff::Timestamp::from_second(self.created_at).map_err(|e| {
            ConversionError::MalformedRecord(format!(
                "invalid created_at '{}': {e}",
                self.created_at
            ))
        })?;

        // The wire `likes` field is informational; the record derives the
        // count from the liker set, so an inconsistent value cannot leak in.
        let liked_by: BTreeSet<Username> = self
            .liked_by
            .iter()
            .map(|name| {
                Username::new(name.as_str())
                    .map_err(|e| ConversionError::MalformedRecord(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        Ok(core::VideoRecord::new(
            VideoId::new(self.id),
            NewVideo {
                title: self.title.clone(),
                url: self.url.clone(),
                duration_secs: self.duration_secs,
                content_type: self.content_type.clone(),
            },
            created_at,
        )
        .with_likers(liked_by))
    }
}

impl TryInto<core::VideoRecord> for Video {
    type Error = ConversionError;

    fn try_into(self) -> Result<core::VideoRecord, Self::Error> {
        (&self).try_into()
    }
}
