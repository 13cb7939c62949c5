use crate::error::{ApiError, Result};
use crate::model::{AddVideoRequest, VideoResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use reel_core::{CatalogError, Username, VideoId};

pub const USERNAME_HEADER: &str = "x-username";

/// Extracts the authenticated caller identity from the request headers.
fn caller(headers: &HeaderMap) -> Result<Username> {
    let value = headers
        .get(USERNAME_HEADER)
        .ok_or(ApiError::MissingUsername)?;
    let value = value
        .to_str()
        .map_err(|e| CatalogError::InvalidUsername(e.to_string()))?;
    Ok(Username::new(value)?)
}

pub async fn add_video_handler(
    State(state): State<AppState>,
    Json(request): Json<AddVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>)> {
    let record = state.catalog().add_video(request.into()).await?;
    Ok((StatusCode::CREATED, Json(VideoResponse::from(&record))))
}

pub async fn list_videos_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoResponse>>> {
    let records = state.catalog().list_videos().await?;
    Ok(Json(records.iter().map(VideoResponse::from).collect()))
}

pub async fn get_video_handler(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<VideoResponse>> {
    let record = state.catalog().get_video(VideoId::new(id)).await?;
    Ok(Json(VideoResponse::from(&record)))
}

pub async fn like_video_handler(
    Path(id): Path<u64>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    let user = caller(&headers)?;
    state.catalog().like(VideoId::new(id), &user).await?;
    Ok(StatusCode::OK)
}

pub async fn unlike_video_handler(
    Path(id): Path<u64>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    let user = caller(&headers)?;
    state.catalog().unlike(VideoId::new(id), &user).await?;
    Ok(StatusCode::OK)
}

pub async fn get_likers_handler(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>> {
    let users = state.catalog().likers(VideoId::new(id)).await?;
    Ok(Json(
        users.iter().map(|user| user.as_str().to_owned()).collect(),
    ))
}
