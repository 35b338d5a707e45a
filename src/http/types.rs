//! Response bodies and query strings

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::projections::{DriverLapTimes, DriverMap, DriverSummary, TelemetrySeries};
use crate::schema::Event;

#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// One schedule row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RaceEntry {
    pub event_name: String,
    pub event_date: NaiveDateTime,
}

impl From<&Event> for RaceEntry {
    fn from(event: &Event) -> Self {
        Self { event_name: event.event_name.clone(), event_date: event.event_date }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RacesResponse {
    pub year: i32,
    pub races: Vec<RaceEntry>,
}

/// Echo of the requested coordinate, as received
#[derive(Debug, Clone, Serialize)]
pub struct Echo {
    pub year: i32,
    pub event: String,
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriversResponse {
    #[serde(flatten)]
    pub request: Echo,
    pub drivers: Vec<DriverSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TelemetryResponse {
    #[serde(flatten)]
    pub request: Echo,
    pub data: DriverMap<TelemetrySeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LapTimesResponse {
    #[serde(flatten)]
    pub request: Echo,
    pub lap_times: DriverMap<DriverLapTimes>,
}

/// Raw query pairs in request order
///
/// Repeated keys are allowed; the last occurrence wins.
pub type QueryPairs = Vec<(String, String)>;

fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().rev().find(|(name, _)| name == key).map(|(_, value)| value.clone())
}

/// `?drivers=...&analyses=...`; both optional here so that a missing one
/// is reported through the error body rather than an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryQuery {
    pub drivers: Option<String>,
    pub analyses: Option<String>,
}

impl From<QueryPairs> for TelemetryQuery {
    fn from(pairs: QueryPairs) -> Self {
        Self { drivers: last_value(&pairs, "drivers"), analyses: last_value(&pairs, "analyses") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LapTimesQuery {
    pub drivers: Option<String>,
}

impl From<QueryPairs> for LapTimesQuery {
    fn from(pairs: QueryPairs) -> Self {
        Self { drivers: last_value(&pairs, "drivers") }
    }
}
