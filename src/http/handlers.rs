//! Endpoint handlers
//!
//! Each data endpoint resolves one session through the shared
//! [`SessionResolver`](crate::SessionResolver) and runs exactly one
//! projection over it.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use tracing::{debug, instrument};

use super::AppState;
use super::error::{ApiError, ErrorReply};
use super::types::*;
use crate::projections::{self, split_codes};

type Reply<T> = Result<Json<T>, ErrorReply>;

pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage { message: "API is running!" })
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

pub async fn races(State(state): State<AppState>, Path(year): Path<String>) -> Reply<RacesResponse> {
    load_races(&state, &year).await.map(Json).map_err(|e| e.with_mode(state.error_mode))
}

pub async fn drivers(
    State(state): State<AppState>,
    Path((year, event, session)): Path<(String, String, String)>,
) -> Reply<DriversResponse> {
    load_drivers(&state, &year, event, session)
        .await
        .map(Json)
        .map_err(|e| e.with_mode(state.error_mode))
}

pub async fn telemetry(
    State(state): State<AppState>,
    Path((year, event, session)): Path<(String, String, String)>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Reply<TelemetryResponse> {
    let query = query_pairs(query).map(TelemetryQuery::from).map_err(|e| e.with_mode(state.error_mode))?;
    load_telemetry(&state, &year, event, session, query)
        .await
        .map(Json)
        .map_err(|e| e.with_mode(state.error_mode))
}

pub async fn lap_times(
    State(state): State<AppState>,
    Path((year, event, session)): Path<(String, String, String)>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Reply<LapTimesResponse> {
    let query = query_pairs(query).map(LapTimesQuery::from).map_err(|e| e.with_mode(state.error_mode))?;
    load_lap_times(&state, &year, event, session, query)
        .await
        .map(Json)
        .map_err(|e| e.with_mode(state.error_mode))
}

fn parse_year(raw: &str) -> Result<i32, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::InvalidYear(raw.to_string()))
}

fn query_pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<QueryPairs, ApiError> {
    query.map(|Query(pairs)| pairs).map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    value.ok_or(ApiError::MissingParameter(name))
}

#[instrument(skip(state))]
async fn load_races(state: &AppState, year: &str) -> Result<RacesResponse, ApiError> {
    let year = parse_year(year)?;
    let schedule = state.resolver.schedule(year).await?;
    Ok(RacesResponse { year, races: schedule.events.iter().map(RaceEntry::from).collect() })
}

#[instrument(skip(state))]
async fn load_drivers(state: &AppState, year: &str, event: String, session: String) -> Result<DriversResponse, ApiError> {
    let year = parse_year(year)?;
    let loaded = state.resolver.resolve(year, &event, &session).await?;
    let drivers = projections::project_roster(&loaded);
    Ok(DriversResponse { request: Echo { year, event, session }, drivers })
}

#[instrument(skip(state))]
async fn load_telemetry(
    state: &AppState,
    year: &str,
    event: String,
    session: String,
    query: TelemetryQuery,
) -> Result<TelemetryResponse, ApiError> {
    let year = parse_year(year)?;
    let drivers = split_codes(&required(query.drivers, "drivers")?);
    let channels = split_codes(&required(query.analyses, "analyses")?);

    let loaded = state.resolver.resolve(year, &event, &session).await?;
    let data = projections::project_telemetry(&loaded, &drivers, &channels);
    for code in drivers.iter().filter(|code| !data.contains(code)) {
        debug!(driver = %code, "No fastest lap, driver omitted");
    }
    Ok(TelemetryResponse { request: Echo { year, event, session }, data })
}

#[instrument(skip(state))]
async fn load_lap_times(
    state: &AppState,
    year: &str,
    event: String,
    session: String,
    query: LapTimesQuery,
) -> Result<LapTimesResponse, ApiError> {
    let year = parse_year(year)?;
    let drivers = split_codes(&required(query.drivers, "drivers")?);

    let loaded = state.resolver.resolve(year, &event, &session).await?;
    let lap_times = projections::project_lap_times(&loaded, &drivers);
    for (code, result) in lap_times.iter() {
        if let Some(err) = result.error() {
            debug!(driver = %code, "Lap times unavailable: {}", err);
        }
    }
    Ok(LapTimesResponse { request: Echo { year, event, session }, lap_times })
}
