//! Video catalog service implementation.
//!
//! This crate provides the like coordinator: the service that reads and
//! mutates a video record's like state while enforcing existence and
//! idempotency rules. Core types are re-exported from `reel_core`.

pub mod service;

pub use reel_core::{Catalog, CatalogError};
pub use service::CatalogService;
