//! HTTP API layer for persona-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: users, comments, and reactions (likes and votes)
//! - **State**: shared service handles via [`AppState`]
//! - **Responses**: the JSON envelope via [`response::ApiResponse`]
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
