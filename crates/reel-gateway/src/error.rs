use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reel_core::CatalogError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("x-username header is required")]
    MissingUsername,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUsername => StatusCode::BAD_REQUEST,
            ApiError::Catalog(source) => match source {
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::AlreadyLiked { .. }
                | CatalogError::NotLiked { .. }
                | CatalogError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
                CatalogError::Storage(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
