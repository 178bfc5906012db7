use serde::{Deserialize, Serialize};

/// `/seasons/{year}/...` path parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearPath {
    pub year: i32,
}

/// `/seasons/{year}/{round}/...` path parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RacePath {
    pub year: i32,
    pub round: u32,
}

/// Pagination for the seasons listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeasonsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Optional round filter for standings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StandingsQuery {
    #[serde(alias = "round_num")]
    pub round: Option<u32>,
}
