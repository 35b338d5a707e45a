//! Lap records
//!
//! A lap row carries the driver reference, the lap number, the lap time, the
//! tyre compound and (optionally) the telemetry stream recorded along it.
//!
//! Two details follow the provider's schema history:
//!
//! - The lap time column may be missing from a document entirely, which is
//!   different from a lap whose time was never set. [`LapTimeField`] keeps
//!   the two apart.
//! - The tyre compound has been published as `Compound` and as
//!   `TyreCompound`; both are kept here and resolved by
//!   [`resolve_compound`](crate::tyre::resolve_compound).

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::TelemetryStream;
use super::string_or_number;

/// A single lap row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LapRecord {
    /// Driver abbreviation
    pub driver: String,
    /// Car number
    #[serde(
        default,
        deserialize_with = "string_or_number::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub driver_number: Option<String>,
    /// Lap number, starting at 1
    pub lap_number: u32,
    /// Lap time
    #[serde(default, skip_serializing_if = "LapTimeField::is_absent")]
    pub lap_time: LapTimeField,
    /// Tyre compound (current field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound: Option<String>,
    /// Tyre compound (legacy field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tyre_compound: Option<String>,
    /// Telemetry recorded along this lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<TelemetryStream>,
}

impl LapRecord {
    /// Lap time as a duration, when one was recorded.
    pub fn duration(&self) -> Option<Duration> {
        match &self.lap_time {
            LapTimeField::Present(LapTimeValue::Duration(d)) => Some(*d),
            _ => None,
        }
    }

    /// Whether this row belongs to the given abbreviation or car number.
    pub fn belongs_to(&self, abbreviation: &str, number: Option<&str>) -> bool {
        self.driver.eq_ignore_ascii_case(abbreviation)
            || matches!((self.driver_number.as_deref(), number), (Some(a), Some(b)) if a == b)
    }
}

/// Lap time column state for one row
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LapTimeField {
    /// The row has no lap time key at all
    #[default]
    Absent,
    /// The key is present (possibly null)
    Present(LapTimeValue),
}

impl LapTimeField {
    pub fn is_absent(&self) -> bool {
        matches!(self, LapTimeField::Absent)
    }
}

/// Value stored under the lap time key
#[derive(Debug, Clone, PartialEq)]
pub enum LapTimeValue {
    /// A lap duration
    Duration(Duration),
    /// The lap has no recorded time (null, `NaT`)
    NotSet,
    /// Something that is not a duration
    Other(String),
}

impl LapTimeValue {
    /// Interpret a raw text value.
    ///
    /// Accepted forms: `1:31.200`, `0:01:31.200`, `0 days 00:01:31.200000`
    /// and plain seconds (`91.2`). `NaT` and empty text mean not set.
    pub fn from_text(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("nat") || text.eq_ignore_ascii_case("nan") {
            return LapTimeValue::NotSet;
        }

        let clock = match text.split_once(" days ") {
            Some((days, rest)) => match days.trim().parse::<u64>() {
                Ok(days) => parse_clock(rest).map(|secs| secs + days as f64 * 86_400.0),
                Err(_) => None,
            },
            None => parse_clock(text),
        };

        clock
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .map(LapTimeValue::Duration)
            .unwrap_or_else(|| LapTimeValue::Other(text.to_string()))
    }

    fn from_seconds(seconds: f64) -> Self {
        if seconds.is_nan() {
            return LapTimeValue::NotSet;
        }
        match Duration::try_from_secs_f64(seconds) {
            Ok(duration) => LapTimeValue::Duration(duration),
            Err(_) => LapTimeValue::Other(seconds.to_string()),
        }
    }
}

/// Parse `[[h:]m:]s.fff` into seconds.
fn parse_clock(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total = 0.0;
    for (idx, part) in parts.iter().enumerate() {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        // Only the seconds component may carry a fraction
        if idx + 1 < parts.len() && value.fract() != 0.0 {
            return None;
        }
        total = total * 60.0 + value;
    }
    Some(total)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLapTime {
    Seconds(f64),
    Text(String),
    Flag(bool),
}

impl<'de> Deserialize<'de> for LapTimeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawLapTime>::deserialize(deserializer)
            .map_err(|e| de::Error::custom(format!("LapTime: {}", e)))?;
        let value = match raw {
            None => LapTimeValue::NotSet,
            Some(RawLapTime::Seconds(secs)) => LapTimeValue::from_seconds(secs),
            Some(RawLapTime::Text(text)) => LapTimeValue::from_text(&text),
            Some(RawLapTime::Flag(flag)) => LapTimeValue::Other(flag.to_string()),
        };
        Ok(LapTimeField::Present(value))
    }
}

impl Serialize for LapTimeField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LapTimeField::Absent | LapTimeField::Present(LapTimeValue::NotSet) => {
                serializer.serialize_none()
            }
            LapTimeField::Present(LapTimeValue::Duration(d)) => serializer.serialize_f64(d.as_secs_f64()),
            LapTimeField::Present(LapTimeValue::Other(text)) => serializer.serialize_str(text),
        }
    }
}
