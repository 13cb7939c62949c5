use reel_core::CatalogError;
use thiserror::Error;
use tonic::{Code, Status};

#[derive(Debug, Error)]
pub(crate) enum GrpcError {
    #[error("x-username metadata is required")]
    MissingUsername,
    #[error("invalid username: {0}")]
    InvalidUsername(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<GrpcError> for Status {
    fn from(error: GrpcError) -> Self {
        match error {
            GrpcError::MissingUsername => {
                Status::new(Code::InvalidArgument, "x-username metadata is required")
            }
            GrpcError::InvalidUsername(reason) => Status::new(Code::InvalidArgument, reason),
            GrpcError::Catalog(source) => match &source {
                CatalogError::NotFound(_) => Status::new(Code::NotFound, source.to_string()),
                CatalogError::AlreadyLiked { .. } | CatalogError::NotLiked { .. } => {
                    Status::new(Code::FailedPrecondition, source.to_string())
                }
                CatalogError::InvalidUsername(_) => {
                    Status::new(Code::InvalidArgument, source.to_string())
                }
                CatalogError::Storage(_) => Status::new(Code::Internal, source.to_string()),
            },
        }
    }
}
