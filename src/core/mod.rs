// Endpoint catalogue
pub mod endpoint;

pub use endpoint::{with_query, Endpoint};
