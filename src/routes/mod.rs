// Route exports
pub mod info;
pub mod seasons;

use actix_web::web;
use std::sync::Arc;

use crate::error::{handle_path_error, handle_query_error};
use crate::services::UpstreamClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { upstream }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(handle_path_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_error))
        .configure(info::configure)
        .configure(seasons::configure);
}
