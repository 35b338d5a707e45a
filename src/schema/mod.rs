//! # Cache Document Schema
//!
//! Serde types for the timing provider's on-disk cache. The cache is a tree
//! of YAML documents whose keys follow the provider's column names
//! (PascalCase):
//!
//! ```text
//! {cache_dir}/
//! └── 2023/
//!     ├── schedule.yaml            EventSchedule
//!     └── bahrain_grand_prix/
//!         ├── Q.yaml               SessionDocument
//!         └── R.yaml               SessionDocument
//! ```
//!
//! A session document looks like:
//!
//! ```yaml
//! EventName: Bahrain Grand Prix
//! SessionName: Race
//! Drivers:
//!   - DriverNumber: 1
//!     Abbreviation: VER
//!     FullName: Max Verstappen
//! Laps:
//!   - Driver: VER
//!     LapNumber: 1
//!     LapTime: 91.2
//!     Compound: SOFT
//!     Telemetry:
//!       Speed: [280.1, 281.4]
//!       RPM: [11000, 11250]
//! ```

use serde::{Deserialize, Serialize};

pub mod driver;
pub mod lap;
pub mod parser;
pub mod schedule;
pub mod telemetry;

pub use driver::DriverInfo;
pub use lap::{LapRecord, LapTimeField, LapTimeValue};
pub use parser::{parse_schedule, parse_session_document};
pub use schedule::{Event, EventSchedule};
pub use telemetry::{SampleValue, TelemetryStream};

use crate::types::SessionKind;

/// One fully loaded session as stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SessionDocument {
    /// Event this session belongs to
    pub event_name: String,
    /// Session name
    pub session_name: SessionKind,
    /// Driver list in the provider's listing order
    #[serde(default)]
    pub drivers: Vec<DriverInfo>,
    /// Every lap of the session, in no particular order
    #[serde(default)]
    pub laps: Vec<LapRecord>,
}

/// Accept car numbers written either as YAML integers or strings.
pub(crate) mod string_or_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    impl From<Raw> for String {
        fn from(raw: Raw) -> Self {
            match raw {
                Raw::Number(n) => n.to_string(),
                Raw::Text(s) => s.trim().to_string(),
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Raw::deserialize(deserializer).map(String::from)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Raw>::deserialize(deserializer).map(|raw| raw.map(String::from))
    }
}
