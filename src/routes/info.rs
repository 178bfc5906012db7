//! Local endpoints: service info, route listing and the upstream health probe.

use actix_web::{web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};

use crate::core::Endpoint;
use crate::models::{ExternalApiStatus, HealthResponse, HealthState, RouteDoc, ServiceInfo};
use crate::routes::AppState;

pub const SERVICE_NAME: &str = "F1 Analytics Workshop API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/docs", web::get().to(docs))
        .route("/health", web::get().to(health_check));
}

/// Root endpoint providing basic API information
async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

/// Health check endpoint
///
/// GET /health
///
/// Probes the Ergast API with a single-season listing. Upstream failure
/// marks the body `unhealthy` but the response is still 200, so monitors can
/// tell a degraded dependency apart from an unreachable service.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut status = HealthState::Healthy;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let url = state.upstream.base_url().to_string();

    let external_api = match state.upstream.fetch(&Endpoint::HEALTH_PROBE.fragment()).await {
        Ok(_) => ExternalApiStatus {
            ergast_f1_api: HealthState::Healthy,
            url,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Health probe against Ergast API failed: {}", e);
            status = HealthState::Unhealthy;
            ExternalApiStatus {
                ergast_f1_api: HealthState::Unhealthy,
                url,
                error: Some(e.to_string()),
            }
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        timestamp,
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        external_api,
    })
}

/// Route table with the upstream fragment each path resolves to
async fn docs() -> impl Responder {
    HttpResponse::Ok().json(route_table())
}

pub fn route_table() -> Vec<RouteDoc> {
    let row = |path: &str, upstream: Option<&str>, parameters: &[&str]| RouteDoc {
        path: path.to_string(),
        upstream: upstream.map(str::to_string),
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
    };

    vec![
        row("/", None, &[]),
        row("/docs", None, &[]),
        row("/health", Some("seasons.json?limit=1"), &[]),
        row("/seasons", Some("seasons.json[?limit=&offset=]"), &["limit?", "offset?"]),
        row("/seasons/{year}/races", Some("{year}/races.json"), &["year"]),
        row("/seasons/{year}/drivers", Some("{year}/drivers.json"), &["year"]),
        row("/seasons/{year}/constructors", Some("{year}/constructors.json"), &["year"]),
        row(
            "/seasons/{year}/standings/drivers",
            Some("{year}[/{round}]/driverStandings.json"),
            &["year", "round?"],
        ),
        row(
            "/seasons/{year}/standings/constructors",
            Some("{year}[/{round}]/constructorStandings.json"),
            &["year", "round?"],
        ),
        row("/seasons/{year}/{round}/results", Some("{year}/{round}/results.json"), &["year", "round"]),
        row(
            "/seasons/{year}/{round}/qualifying",
            Some("{year}/{round}/qualifying.json"),
            &["year", "round"],
        ),
    ]
}
