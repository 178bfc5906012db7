// Service exports
pub mod ergast;

pub use ergast::{ErgastClient, UpstreamClient, UpstreamConfig, UpstreamError};
