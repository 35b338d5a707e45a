//! Shared fixtures: a small 2023 cache tree and a request helper.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

use timing_tower::{Config, http};

pub const SCHEDULE_2023: &str = r#"
Year: 2023
Events:
  - RoundNumber: 0
    Country: Bahrain
    Location: Sakhir
    EventName: Pre-Season Testing
    EventDate: "2023-02-25"
  - RoundNumber: 1
    Country: Bahrain
    Location: Sakhir
    EventName: Bahrain Grand Prix
    EventDate: "2023-03-05"
    Sessions: [FP1, FP2, FP3, Q, R]
  - RoundNumber: 2
    Country: Saudi Arabia
    Location: Jeddah
    EventName: Saudi Arabian Grand Prix
    EventDate: "2023-03-19 17:00:00"
"#;

/// Bahrain race: VER has three timed laps listed out of order, HAM only
/// publishes the legacy compound field and has one untimed lap, SAR never
/// completed a lap.
pub const BAHRAIN_RACE: &str = r#"
EventName: Bahrain Grand Prix
SessionName: R
Drivers:
  - DriverNumber: 1
    Abbreviation: VER
    FullName: Max Verstappen
    TeamName: Red Bull Racing
  - DriverNumber: "44"
    Abbreviation: HAM
    FullName: Lewis Hamilton
    TeamName: Mercedes
  - DriverNumber: 2
    Abbreviation: SAR
    FullName: Logan Sargeant
    TeamName: Williams
Laps:
  - Driver: VER
    DriverNumber: 1
    LapNumber: 3
    LapTime: "0 days 00:01:31.000000"
    Compound: MEDIUM
  - Driver: VER
    DriverNumber: 1
    LapNumber: 1
    LapTime: "1:31.200"
    Compound: SOFT
    Telemetry:
      Speed: [101.0, 150.5]
  - Driver: VER
    DriverNumber: 1
    LapNumber: 2
    LapTime: 90.8
    Compound: SOFT
    TyreCompound: HARD
    Telemetry:
      Speed: [280.1, 291.5, 305.25]
      RPM: [11000, 11250, 11800]
      nGear: [7, 7, 8]
  - Driver: HAM
    DriverNumber: 44
    LapNumber: 1
    LapTime: 93.0
    TyreCompound: HARD
    Telemetry:
      Speed: [275.0, 288.0]
  - Driver: HAM
    DriverNumber: 44
    LapNumber: 2
    LapTime: ~
    TyreCompound: HARD
"#;

/// Bahrain qualifying without any lap time column.
pub const BAHRAIN_QUALIFYING: &str = r#"
EventName: Bahrain Grand Prix
SessionName: Q
Drivers:
  - DriverNumber: 1
    Abbreviation: VER
    FullName: Max Verstappen
Laps:
  - Driver: VER
    DriverNumber: 1
    LapNumber: 1
    Compound: SOFT
"#;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// A temporary cache directory holding the 2023 fixtures.
pub fn cache() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let season = dir.path().join("2023");
    write(&season.join("schedule.yaml"), SCHEDULE_2023);
    write(&season.join("bahrain_grand_prix").join("R.yaml"), BAHRAIN_RACE);
    write(&season.join("bahrain_grand_prix").join("Q.yaml"), BAHRAIN_QUALIFYING);
    dir
}

pub fn app(cache: &TempDir, strict_status: bool) -> Router {
    let mut config = Config::with_cache_dir(cache.path());
    config.strict_status = strict_status;
    http::app(&config).unwrap()
}

/// Issue a GET and return status plus raw body bytes.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = get_raw(app, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
