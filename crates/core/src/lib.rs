//! Core business logic for persona-rs.

pub mod services;
pub mod vocabulary;

pub use services::*;
