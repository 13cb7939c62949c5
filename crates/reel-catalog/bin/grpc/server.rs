use crate::error::GrpcError;
use reel_core::{Catalog, NewVideo, Username, VideoId};
use reel_proto_schema::v1 as proto;
use reel_proto_schema::v1::catalog_service_server::CatalogService;
use tonic::{Request, Response, Status};

pub const USERNAME_METADATA_KEY: &str = "x-username";

pub struct CatalogGrpcServer<C> {
    catalog: C,
}

impl<C: Catalog> CatalogGrpcServer<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }
}

/// Extracts the authenticated caller identity from request metadata.
fn caller<T>(request: &Request<T>) -> Result<Username, GrpcError> {
    let value = request
        .metadata()
        .get(USERNAME_METADATA_KEY)
        .ok_or(GrpcError::MissingUsername)?;
    let value = value
        .to_str()
        .map_err(|e| GrpcError::InvalidUsername(e.to_string()))?;
    Username::new(value).map_err(|e| GrpcError::InvalidUsername(e.to_string()))
}

#[tonic::async_trait]
impl<C: Catalog> CatalogService for CatalogGrpcServer<C> {
    async fn add_video(
        &self,
        request: Request<proto::AddVideoRequest>,
    ) -> Result<Response<proto::AddVideoResponse>, Status> {
        let request = request.into_inner();
        let video = NewVideo {
            title: request.title,
            url: request.url,
            duration_secs: request.duration_secs,
            content_type: request.content_type,
        };

        let record = self
            .catalog
            .add_video(video)
            .await
            .map_err(GrpcError::from)?;

        Ok(Response::new(proto::AddVideoResponse {
            video: Some(proto::Video::from(&record)),
        }))
    }

    async fn list_videos(
        &self,
        _request: Request<proto::ListVideosRequest>,
    ) -> Result<Response<proto::ListVideosResponse>, Status> {
        let records = self.catalog.list_videos().await.map_err(GrpcError::from)?;

        Ok(Response::new(proto::ListVideosResponse {
            videos: records.iter().map(proto::Video::from).collect(),
        }))
    }

    async fn get_video(
        &self,
        request: Request<proto::GetVideoRequest>,
    ) -> Result<Response<proto::GetVideoResponse>, Status> {
        let id = VideoId::new(request.into_inner().id);
        let record = self.catalog.get_video(id).await.map_err(GrpcError::from)?;

        Ok(Response::new(proto::GetVideoResponse {
            video: Some(proto::Video::from(&record)),
        }))
    }

    async fn like_video(
        &self,
        request: Request<proto::LikeVideoRequest>,
    ) -> Result<Response<proto::LikeVideoResponse>, Status> {
        let user = caller(&request)?;
        let id = VideoId::new(request.into_inner().id);

        self.catalog
            .like(id, &user)
            .await
            .map_err(GrpcError::from)?;

        Ok(Response::new(proto::LikeVideoResponse {}))
    }

    async fn unlike_video(
        &self,
        request: Request<proto::UnlikeVideoRequest>,
    ) -> Result<Response<proto::UnlikeVideoResponse>, Status> {
        let user = caller(&request)?;
        let id = VideoId::new(request.into_inner().id);

        self.catalog
            .unlike(id, &user)
            .await
            .map_err(GrpcError::from)?;

        Ok(Response::new(proto::UnlikeVideoResponse {}))
    }

    async fn get_likers(
        &self,
        request: Request<proto::GetLikersRequest>,
    ) -> Result<Response<proto::GetLikersResponse>, Status> {
        let id = VideoId::new(request.into_inner().id);
        let users = self.catalog.likers(id).await.map_err(GrpcError::from)?;

        Ok(Response::new(proto::GetLikersResponse {
            users: users.iter().map(|user| user.as_str().to_owned()).collect(),
        }))
    }
}
