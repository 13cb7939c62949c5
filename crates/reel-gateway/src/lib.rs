//! HTTP/JSON gateway for the Reel video catalog.
//!
//! Thin transport layer over the `Catalog` trait: routes, serde models,
//! and the mapping from domain errors to HTTP statuses. All like-state
//! rules live in `reel_catalog`; the gateway only extracts the caller
//! identity and converts payloads.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
