//! Core types and traits for the Reel video catalog.
//!
//! This crate provides the shared types and traits used by the catalog
//! service, the storage backends, and the transport layers.

pub mod catalog;
pub mod error;
pub mod repository;
pub mod username;
pub mod video;

pub use catalog::Catalog;
pub use error::{CatalogError, StorageError};
pub use repository::{ReadRepository, Repository};
pub use username::Username;
pub use video::{NewVideo, VideoId, VideoRecord};
