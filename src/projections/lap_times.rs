use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::time::Duration;
use thiserror::Error;

use super::DriverMap;
use crate::schema::{LapTimeField, LapTimeValue};
use crate::session::Session;
use crate::tyre::{self, TyreCompound};

/// Per-driver failure reported next to sibling drivers' data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LapTimingError {
    #[error("No laps found for this driver")]
    NoLaps,

    #[error("LapTime field missing")]
    FieldMissing,

    #[error("LapTime field is not a duration")]
    WrongType,
}

/// Lap times and compounds in ascending lap-number order
///
/// Both vectors always have the same length. A lap without a recorded time
/// keeps its slot as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapTimingSeries {
    pub lap_times_min: Vec<Option<f64>>,
    pub tyre_compounds: Vec<TyreCompound>,
}

/// Outcome for one requested driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverLapTimes {
    Series(LapTimingSeries),
    Error(LapTimingError),
}

impl DriverLapTimes {
    pub fn series(&self) -> Option<&LapTimingSeries> {
        match self {
            DriverLapTimes::Series(series) => Some(series),
            DriverLapTimes::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LapTimingError> {
        match self {
            DriverLapTimes::Series(_) => None,
            DriverLapTimes::Error(err) => Some(err),
        }
    }
}

impl Serialize for DriverLapTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DriverLapTimes::Series(series) => series.serialize(serializer),
            DriverLapTimes::Error(err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &err.to_string())?;
                map.end()
            }
        }
    }
}

/// Convert seconds to minutes rounded to 4 decimal places.
///
/// Rounds the exact binary value of the quotient through its decimal
/// expansion, so `60.063` seconds gives `1.001` rather than `1.0011`.
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    let minutes = seconds / 60.0;
    format!("{:.4}", minutes).parse().unwrap_or(minutes)
}

fn duration_to_minutes(duration: Duration) -> f64 {
    seconds_to_minutes(duration.as_secs_f64())
}

/// Build lap-time series for each requested driver.
///
/// Every requested code gets an entry; failures are per driver and never
/// affect the other drivers of the same request.
pub fn project_lap_times(session: &Session, drivers: &[String]) -> DriverMap<DriverLapTimes> {
    let mut lap_times = DriverMap::new();
    for code in drivers {
        if !lap_times.contains(code) {
            lap_times.insert(code.clone(), driver_lap_times(session, code));
        }
    }
    lap_times
}

fn driver_lap_times(session: &Session, code: &str) -> DriverLapTimes {
    let laps = session.laps_for(code).sorted_by_lap_number();
    if laps.is_empty() {
        return DriverLapTimes::Error(LapTimingError::NoLaps);
    }
    if !session.has_lap_time_field() {
        return DriverLapTimes::Error(LapTimingError::FieldMissing);
    }

    let mut series = LapTimingSeries {
        lap_times_min: Vec::with_capacity(laps.len()),
        tyre_compounds: Vec::with_capacity(laps.len()),
    };
    for lap in laps.iter() {
        let minutes = match &lap.lap_time {
            LapTimeField::Present(LapTimeValue::Duration(duration)) => Some(duration_to_minutes(*duration)),
            LapTimeField::Present(LapTimeValue::Other(_)) => return DriverLapTimes::Error(LapTimingError::WrongType),
            LapTimeField::Present(LapTimeValue::NotSet) | LapTimeField::Absent => None,
        };
        series.lap_times_min.push(minutes);
        series.tyre_compounds.push(tyre::resolve_compound(lap));
    }

    DriverLapTimes::Series(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SessionBuilder;
    use proptest::prelude::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|code| code.to_string()).collect()
    }

    #[test]
    fn ninety_seconds_is_one_and_a_half_minutes() {
        assert_eq!(seconds_to_minutes(90.0), 1.5);
    }

    #[test]
    fn rounds_the_exact_quotient() {
        // Each quotient sits just below a half in its binary form.
        assert_eq!(seconds_to_minutes(60.063), 1.001);
        assert_eq!(seconds_to_minutes(60.069), 1.0011);
        assert_eq!(seconds_to_minutes(0.021), 0.0003);
    }

    #[test]
    fn converts_in_lap_number_order() {
        let session = SessionBuilder::race(2023, "Bahrain Grand Prix")
            .driver("1", "VER", "Max Verstappen")
            .lap("VER", 3, Some(91.0), Some("HARD"))
            .lap("VER", 1, Some(91.2), Some("SOFT"))
            .lap("VER", 2, Some(90.8), Some("SOFT"))
            .build();

        let result = project_lap_times(&session, &codes(&["VER"]));
        let series = result.get("VER").and_then(DriverLapTimes::series).unwrap();

        assert_eq!(series.lap_times_min, [Some(1.52), Some(1.5133), Some(1.5167)]);
        let tyres: Vec<&str> = series.tyre_compounds.iter().map(TyreCompound::as_str).collect();
        assert_eq!(tyres, ["SOFT", "SOFT", "HARD"]);
    }

    #[test]
    fn per_driver_errors_do_not_abort_siblings() {
        let session = SessionBuilder::race(2023, "Bahrain Grand Prix")
            .driver("1", "VER", "Max Verstappen")
            .driver("2", "SAR", "Logan Sargeant")
            .lap("VER", 1, Some(90.0), None)
            .build();

        let result = project_lap_times(&session, &codes(&["SAR", "VER", "BADCODE"]));
        assert_eq!(result.keys().collect::<Vec<_>>(), ["SAR", "VER", "BADCODE"]);
        assert_eq!(result.get("SAR").and_then(DriverLapTimes::error), Some(&LapTimingError::NoLaps));
        assert_eq!(result.get("BADCODE").and_then(DriverLapTimes::error), Some(&LapTimingError::NoLaps));
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            concat!(
                r#"{"SAR":{"error":"No laps found for this driver"},"#,
                r#""VER":{"lap_times_min":[1.5],"tyre_compounds":["Unknown"]},"#,
                r#""BADCODE":{"error":"No laps found for this driver"}}"#
            )
        );
    }

    #[test]
    fn missing_lap_time_column_is_reported() {
        let session = SessionBuilder::race(2023, "Bahrain Grand Prix")
            .driver("1", "VER", "Max Verstappen")
            .untimed_lap("VER", 1, Some("SOFT"))
            .build();

        let result = project_lap_times(&session, &codes(&["VER"]));
        assert_eq!(result.get("VER").and_then(DriverLapTimes::error), Some(&LapTimingError::FieldMissing));
    }

    #[test]
    fn non_duration_lap_time_is_reported() {
        let session = SessionBuilder::race(2023, "Bahrain Grand Prix")
            .driver("1", "VER", "Max Verstappen")
            .driver("11", "PER", "Sergio Perez")
            .malformed_lap("VER", 1, "fast")
            .lap("PER", 1, Some(92.4), Some("MEDIUM"))
            .build();

        let result = project_lap_times(&session, &codes(&["VER", "PER"]));
        assert_eq!(result.get("VER").and_then(DriverLapTimes::error), Some(&LapTimingError::WrongType));
        assert!(result.get("PER").and_then(DriverLapTimes::series).is_some());
    }

    #[test]
    fn laps_without_time_keep_their_slot() {
        let session = SessionBuilder::race(2023, "Bahrain Grand Prix")
            .driver("1", "VER", "Max Verstappen")
            .lap("VER", 1, Some(120.0), Some("SOFT"))
            .lap("VER", 2, None, Some("SOFT"))
            .untimed_lap("VER", 3, Some("HARD"))
            .build();

        let result = project_lap_times(&session, &codes(&["VER"]));
        assert_eq!(
            serde_json::to_string(result.get("VER").unwrap()).unwrap(),
            r#"{"lap_times_min":[2.0,null,null],"tyre_compounds":["SOFT","SOFT","HARD"]}"#
        );
    }

    proptest! {
        #[test]
        fn minutes_have_at_most_four_decimals(millis in 0u64..10_000_000) {
            let minutes = seconds_to_minutes(millis as f64 / 1000.0);
            let scaled = minutes * 10_000.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
            prop_assert!((minutes * 60.0 - millis as f64 / 1000.0).abs() <= 0.003 + 1e-9);
        }
    }
}
