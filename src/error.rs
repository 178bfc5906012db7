use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::UpstreamError;

/// Errors surfaced to API clients as `{"detail": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error accessing Ergast F1 API: {0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Not Found")]
    NotFound,
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

/// Handle malformed path segments, e.g. a non-integer year
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path parameter error on {}: {}", req.path(), err);
    ApiError::InvalidParameter(format!("Invalid path parameter: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query parameter error on {}: {}", req.path(), err);
    ApiError::InvalidParameter(format!("Invalid query parameter: {}", err)).into()
}

/// Fallback for unrouted paths
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
