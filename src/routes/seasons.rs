use actix_web::{web, HttpResponse};

use crate::core::Endpoint;
use crate::error::ApiError;
use crate::models::{RacePath, SeasonsQuery, StandingsQuery, YearPath};
use crate::routes::AppState;

/// Configure all season-related proxy routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/seasons", web::get().to(get_seasons))
        .route("/seasons/{year}/races", web::get().to(get_races))
        .route("/seasons/{year}/drivers", web::get().to(get_season_drivers))
        .route("/seasons/{year}/constructors", web::get().to(get_season_constructors))
        .route("/seasons/{year}/standings/drivers", web::get().to(get_driver_standings))
        .route("/seasons/{year}/standings/constructors", web::get().to(get_constructor_standings))
        .route("/seasons/{year}/{round}/results", web::get().to(get_race_results))
        .route("/seasons/{year}/{round}/qualifying", web::get().to(get_qualifying_results));
}

/// Forward one endpoint to the upstream API and return its body unchanged
async fn proxy(state: &AppState, endpoint: Endpoint) -> Result<HttpResponse, ApiError> {
    let fragment = endpoint.fragment();

    match state.upstream.fetch(&fragment).await {
        Ok(payload) => Ok(HttpResponse::Ok().json(payload)),
        Err(e) => {
            tracing::warn!("Upstream request for {} failed: {}", fragment, e);
            Err(e.into())
        }
    }
}

/// GET /seasons?limit={limit}&offset={offset}
async fn get_seasons(
    state: web::Data<AppState>,
    query: web::Query<SeasonsQuery>,
) -> Result<HttpResponse, ApiError> {
    let SeasonsQuery { limit, offset } = query.into_inner();
    proxy(&state, Endpoint::Seasons { limit, offset }).await
}

/// GET /seasons/{year}/races
async fn get_races(
    state: web::Data<AppState>,
    path: web::Path<YearPath>,
) -> Result<HttpResponse, ApiError> {
    proxy(&state, Endpoint::Races { year: path.year }).await
}

/// GET /seasons/{year}/drivers
async fn get_season_drivers(
    state: web::Data<AppState>,
    path: web::Path<YearPath>,
) -> Result<HttpResponse, ApiError> {
    proxy(&state, Endpoint::Drivers { year: path.year }).await
}

/// GET /seasons/{year}/constructors
async fn get_season_constructors(
    state: web::Data<AppState>,
    path: web::Path<YearPath>,
) -> Result<HttpResponse, ApiError> {
    proxy(&state, Endpoint::Constructors { year: path.year }).await
}

/// GET /seasons/{year}/standings/drivers?round={round}
async fn get_driver_standings(
    state: web::Data<AppState>,
    path: web::Path<YearPath>,
    query: web::Query<StandingsQuery>,
) -> Result<HttpResponse, ApiError> {
    let endpoint = Endpoint::DriverStandings {
        year: path.year,
        round: query.round,
    };
    proxy(&state, endpoint).await
}

/// GET /seasons/{year}/standings/constructors?round={round}
async fn get_constructor_standings(
    state: web::Data<AppState>,
    path: web::Path<YearPath>,
    query: web::Query<StandingsQuery>,
) -> Result<HttpResponse, ApiError> {
    let endpoint = Endpoint::ConstructorStandings {
        year: path.year,
        round: query.round,
    };
    proxy(&state, endpoint).await
}

/// GET /seasons/{year}/{round}/results
async fn get_race_results(
    state: web::Data<AppState>,
    path: web::Path<RacePath>,
) -> Result<HttpResponse, ApiError> {
    proxy(&state, Endpoint::Results { year: path.year, round: path.round }).await
}

/// GET /seasons/{year}/{round}/qualifying
async fn get_qualifying_results(
    state: web::Data<AppState>,
    path: web::Path<RacePath>,
) -> Result<HttpResponse, ApiError> {
    proxy(&state, Endpoint::Qualifying { year: path.year, round: path.round }).await
}
