use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    add_video_handler, get_likers_handler, get_video_handler, health_handler,
    like_video_handler, list_videos_handler, unlike_video_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/v1/videos",
                Router::new()
                    .route("/", post(add_video_handler).get(list_videos_handler))
                    .route("/{id}", get(get_video_handler))
                    .route("/{id}/like", post(like_video_handler))
                    .route("/{id}/unlike", post(unlike_video_handler))
                    .route("/{id}/likedby", get(get_likers_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use reel_catalog::CatalogService;
    use reel_storage::InMemoryRepository;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let catalog = CatalogService::new(InMemoryRepository::new());
        App::router(AppState::new(Arc::new(catalog)))
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn add_video_request() -> Request<Body> {
        let payload = json!({
            "title": "Launch highlights",
            "url": "https://videos.example.com/launch.mp4",
            "duration_secs": 95,
            "content_type": "video/mp4",
        });
        Request::builder()
            .method("POST")
            .uri("/v1/videos")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn empty_post(uri: &str, username: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(username) = username {
            builder = builder.header("x-username", username);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let router = app();

        let (status, body) = send(&router, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn add_then_get_video() {
        let router = app();

        let (status, body) = send(&router, add_video_request()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["likes"], 0);

        let (status, body) = send(&router, get("/v1/videos/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Launch highlights");
        assert_eq!(body["liked_by"], json!([]));
    }

    #[tokio::test]
    async fn get_missing_video_is_404() {
        let router = app();

        let (status, _) = send(&router, get("/v1/videos/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn like_unlike_flow() {
        let router = app();
        send(&router, add_video_request()).await;

        // First like succeeds.
        let (status, _) = send(&router, empty_post("/v1/videos/1/like", Some("alice"))).await;
        assert_eq!(status, StatusCode::OK);

        // Redundant like is a client error and leaves state unchanged.
        let (status, _) = send(&router, empty_post("/v1/videos/1/like", Some("alice"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, get("/v1/videos/1/likedby")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["alice"]));

        // Unlike by a user who never liked is a client error.
        let (status, _) = send(&router, empty_post("/v1/videos/1/unlike", Some("bob"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, empty_post("/v1/videos/1/unlike", Some("alice"))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, get("/v1/videos/1")).await;
        assert_eq!(body["likes"], 0);
    }

    #[tokio::test]
    async fn two_likers_are_listed_in_order() {
        let router = app();
        send(&router, add_video_request()).await;

        send(&router, empty_post("/v1/videos/1/like", Some("bob"))).await;
        send(&router, empty_post("/v1/videos/1/like", Some("alice"))).await;

        let (_, body) = send(&router, get("/v1/videos/1")).await;
        assert_eq!(body["likes"], 2);

        let (_, body) = send(&router, get("/v1/videos/1/likedby")).await;
        assert_eq!(body, json!(["alice", "bob"]));
    }

    #[tokio::test]
    async fn like_without_username_header_is_rejected() {
        let router = app();
        send(&router, add_video_request()).await;

        let (status, body) = send(&router, empty_post("/v1/videos/1/like", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("x-username"));
    }

    #[tokio::test]
    async fn like_missing_video_is_404() {
        let router = app();

        let (status, _) = send(&router, empty_post("/v1/videos/42/like", Some("alice"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_videos() {
        let router = app();
        send(&router, add_video_request()).await;
        send(&router, add_video_request()).await;

        let (status, body) = send(&router, get("/v1/videos")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
