//! Test utilities for building sessions and cache trees
//!
//! Unit tests and benchmarks build sessions in memory with
//! [`SessionBuilder`] instead of depending on a real provider cache. The
//! same builder can write its document into a cache directory laid out the
//! way [`CacheProvider`](crate::providers::CacheProvider) expects.

#![cfg(any(test, feature = "benchmark"))]

use chrono::NaiveDate;
use std::path::Path;
use std::time::Duration;

use crate::schema::{
    DriverInfo, Event, EventSchedule, LapRecord, LapTimeField, LapTimeValue, SampleValue,
    SessionDocument, TelemetryStream,
};
use crate::types::SessionKind;
use crate::{Result, Session, TimingError};

/// Fluent builder for in-memory sessions.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    year: i32,
    event: Event,
    document: SessionDocument,
}

impl SessionBuilder {
    /// Start a race session for the given event.
    pub fn race(year: i32, event_name: &str) -> Self {
        Self::new(year, event_name, SessionKind::Race)
    }

    pub fn new(year: i32, event_name: &str, kind: SessionKind) -> Self {
        let event = Event {
            round_number: 1,
            country: String::new(),
            location: String::new(),
            event_name: event_name.to_string(),
            event_date: NaiveDate::from_ymd_opt(year, 3, 5)
                .unwrap_or_default()
                .and_time(chrono::NaiveTime::MIN),
            sessions: Vec::new(),
        };
        let document = SessionDocument {
            event_name: event_name.to_string(),
            session_name: kind,
            drivers: Vec::new(),
            laps: Vec::new(),
        };
        Self { year, event, document }
    }

    /// Set round, country and location of the event.
    pub fn held_at(mut self, round: u32, country: &str, location: &str) -> Self {
        self.event.round_number = round;
        self.event.country = country.to_string();
        self.event.location = location.to_string();
        self
    }

    pub fn driver(mut self, number: &str, abbreviation: &str, full_name: &str) -> Self {
        self.document.drivers.push(DriverInfo {
            driver_number: number.to_string(),
            abbreviation: abbreviation.to_string(),
            full_name: full_name.to_string(),
            team_name: None,
        });
        self
    }

    /// Add a lap with a lap time in seconds (`None` records a lap without time).
    pub fn lap(self, abbreviation: &str, lap_number: u32, seconds: Option<f64>, compound: Option<&str>) -> Self {
        let value = match seconds {
            Some(secs) => LapTimeValue::Duration(Duration::from_secs_f64(secs)),
            None => LapTimeValue::NotSet,
        };
        self.push_lap(abbreviation, lap_number, LapTimeField::Present(value), compound, None)
    }

    /// Add a lap whose compound is only published under the legacy field.
    pub fn legacy_lap(self, abbreviation: &str, lap_number: u32, seconds: f64, compound: &str) -> Self {
        let value = LapTimeField::Present(LapTimeValue::Duration(Duration::from_secs_f64(seconds)));
        self.push_lap(abbreviation, lap_number, value, None, Some(compound))
    }

    /// Add a lap without any lap time key.
    pub fn untimed_lap(self, abbreviation: &str, lap_number: u32, compound: Option<&str>) -> Self {
        self.push_lap(abbreviation, lap_number, LapTimeField::Absent, compound, None)
    }

    /// Add a lap whose lap time is not a duration.
    pub fn malformed_lap(self, abbreviation: &str, lap_number: u32, raw: &str) -> Self {
        let value = LapTimeField::Present(LapTimeValue::Other(raw.to_string()));
        self.push_lap(abbreviation, lap_number, value, None, None)
    }

    /// Attach a telemetry stream to an existing lap.
    pub fn telemetry(mut self, abbreviation: &str, lap_number: u32, stream: TelemetryStream) -> Self {
        if let Some(lap) = self
            .document
            .laps
            .iter_mut()
            .find(|lap| lap.driver == abbreviation && lap.lap_number == lap_number)
        {
            lap.telemetry = Some(stream);
        }
        self
    }

    fn push_lap(
        mut self,
        abbreviation: &str,
        lap_number: u32,
        lap_time: LapTimeField,
        compound: Option<&str>,
        tyre_compound: Option<&str>,
    ) -> Self {
        let driver_number = self
            .document
            .drivers
            .iter()
            .find(|driver| driver.abbreviation == abbreviation)
            .map(|driver| driver.driver_number.clone());

        self.document.laps.push(LapRecord {
            driver: abbreviation.to_string(),
            driver_number,
            lap_number,
            lap_time,
            compound: compound.map(str::to_string),
            tyre_compound: tyre_compound.map(str::to_string),
            telemetry: None,
        });
        self
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn document(&self) -> &SessionDocument {
        &self.document
    }

    pub fn build(self) -> Session {
        Session::new(self.year, self.event, self.document)
    }
}

/// Build a telemetry stream from float channels.
pub fn stream(channels: &[(&str, &[f64])]) -> TelemetryStream {
    channels.iter().fold(TelemetryStream::new(), |stream, (name, values)| {
        stream.with_channel(*name, values.iter().map(|v| SampleValue::Float(*v)).collect())
    })
}

/// A large synthetic race for benchmarks.
pub fn synthetic_session(drivers: usize, laps: u32, samples: usize) -> Session {
    let mut builder = SessionBuilder::race(2023, "Synthetic Grand Prix");
    let codes: Vec<String> = (0..drivers).map(|i| format!("D{:02}", i)).collect();

    for (i, code) in codes.iter().enumerate() {
        builder = builder.driver(&(i + 1).to_string(), code, &format!("Driver {}", i + 1));
    }

    for code in &codes {
        for lap in 1..=laps {
            let seconds = 90.0 + f64::from(lap % 7) * 0.137;
            let compound = if lap < laps / 2 { "MEDIUM" } else { "HARD" };
            let speed: Vec<f64> = (0..samples).map(|s| 200.0 + (s % 120) as f64).collect();
            let rpm: Vec<f64> = (0..samples).map(|s| 10_000.0 + (s % 50) as f64 * 20.0).collect();
            builder = builder
                .lap(code, lap, Some(seconds), Some(compound))
                .telemetry(code, lap, stream(&[("Speed", &speed), ("RPM", &rpm)]));
        }
    }

    builder.build()
}

/// Write a schedule and session documents into a cache directory.
pub fn write_cache(root: &Path, schedule: &EventSchedule, sessions: &[&SessionBuilder]) -> Result<()> {
    let season_dir = root.join(schedule.year.to_string());
    std::fs::create_dir_all(&season_dir).map_err(|e| TimingError::file_error(&season_dir, e))?;

    let schedule_yaml = serde_yaml_ng::to_string(schedule)?;
    let schedule_path = season_dir.join("schedule.yaml");
    std::fs::write(&schedule_path, schedule_yaml).map_err(|e| TimingError::file_error(&schedule_path, e))?;

    for session in sessions {
        let event_dir = season_dir.join(session.event().slug());
        std::fs::create_dir_all(&event_dir).map_err(|e| TimingError::file_error(&event_dir, e))?;

        let path = event_dir.join(format!("{}.yaml", session.document().session_name.code()));
        let yaml = serde_yaml_ng::to_string(session.document())?;
        std::fs::write(&path, yaml).map_err(|e| TimingError::file_error(&path, e))?;
    }

    Ok(())
}
