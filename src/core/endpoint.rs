/// Upstream resources addressable through the proxy
///
/// Every variant maps to exactly one Ergast fragment, so handlers never
/// format URLs themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Seasons { limit: Option<u32>, offset: Option<u32> },
    Races { year: i32 },
    Drivers { year: i32 },
    Constructors { year: i32 },
    DriverStandings { year: i32, round: Option<u32> },
    ConstructorStandings { year: i32, round: Option<u32> },
    Results { year: i32, round: u32 },
    Qualifying { year: i32, round: u32 },
}

impl Endpoint {
    /// Lightweight request used to probe upstream availability
    pub const HEALTH_PROBE: Endpoint = Endpoint::Seasons {
        limit: Some(1),
        offset: None,
    };

    /// Path-plus-query suffix appended to the upstream base URL
    pub fn fragment(&self) -> String {
        match *self {
            Endpoint::Seasons { limit, offset } => {
                with_query("seasons.json", &[("limit", limit), ("offset", offset)])
            }
            Endpoint::Races { year } => format!("{}/races.json", year),
            Endpoint::Drivers { year } => format!("{}/drivers.json", year),
            Endpoint::Constructors { year } => format!("{}/constructors.json", year),
            Endpoint::DriverStandings { year, round } => {
                standings_fragment(year, round, "driverStandings.json")
            }
            Endpoint::ConstructorStandings { year, round } => {
                standings_fragment(year, round, "constructorStandings.json")
            }
            Endpoint::Results { year, round } => format!("{}/{}/results.json", year, round),
            Endpoint::Qualifying { year, round } => format!("{}/{}/qualifying.json", year, round),
        }
    }
}

fn standings_fragment(year: i32, round: Option<u32>, resource: &str) -> String {
    match round {
        Some(round) => format!("{}/{}/{}", year, round, resource),
        None => format!("{}/{}", year, resource),
    }
}

/// Append the supplied parameters as `key=value` pairs joined by `&`.
///
/// `None` values are skipped entirely; if nothing is supplied the path is
/// returned without a `?`.
pub fn with_query(path: &str, params: &[(&str, Option<u32>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
        .collect();

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}
