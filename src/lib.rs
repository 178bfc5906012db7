//! F1 Analytics API - HTTP wrapper around the Ergast F1 statistics API
//!
//! Each route maps to exactly one upstream resource and returns its JSON
//! body untouched. `/health` additionally reports whether the upstream API
//! is reachable.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::Endpoint;
pub use error::ApiError;
pub use routes::{configure_routes, AppState};
pub use services::{ErgastClient, UpstreamClient, UpstreamConfig, UpstreamError};
