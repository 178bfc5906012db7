// Model exports
pub mod requests;
pub mod responses;

pub use requests::{RacePath, SeasonsQuery, StandingsQuery, YearPath};
pub use responses::{ErrorResponse, ExternalApiStatus, HealthResponse, HealthState, RouteDoc, ServiceInfo};
