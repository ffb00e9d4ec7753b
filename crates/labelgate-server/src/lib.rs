//! Labelgate Server - Scheduler extender HTTP endpoint
//!
//! This crate provides:
//! - Axum-based HTTP server exposing the `filter` extender verb
//! - Request decoding with optional raw request dumps
//! - Response encoding and status mapping
//! - Health endpoints

pub mod codec;
pub mod error;
pub mod handlers;
pub mod response;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use error::{ApiError, Result};
pub use server::{Config, ExtenderServer, FILTER_PATH};
pub use state::AppState;
