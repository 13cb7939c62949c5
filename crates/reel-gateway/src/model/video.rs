use reel_core::{NewVideo, VideoRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    pub title: String,
    pub url: String,
    pub duration_secs: u64,
    pub content_type: String,
}

impl From<AddVideoRequest> for NewVideo {
    fn from(request: AddVideoRequest) -> Self {
        NewVideo {
            title: request.title,
            url: request.url,
            duration_secs: request.duration_secs,
            content_type: request.content_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub duration_secs: u64,
    pub content_type: String,
    pub created_at: String,
    pub likes: u64,
    pub liked_by: Vec<String>,
}

impl From<&VideoRecord> for VideoResponse {
    fn from(record: &VideoRecord) -> Self {
        VideoResponse {
            id: record.id.as_u64(),
            title: record.title.clone(),
            url: record.url.clone(),
            duration_secs: record.duration_secs,
            content_type: record.content_type.clone(),
            created_at: record.created_at.to_string(),
            likes: record.likes(),
            liked_by: record
                .liked_by()
                .map(|user| user.as_str().to_owned())
                .collect(),
        }
    }
}
