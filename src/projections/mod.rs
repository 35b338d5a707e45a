//! Session projections
//!
//! Three independent views derived from one loaded [`Session`](crate::Session):
//!
//! - [`project_roster`]: driver summaries with fastest-lap tyre
//! - [`project_telemetry`]: channel series from each driver's fastest lap
//! - [`project_lap_times`]: per-lap times in minutes with per-lap tyre
//!
//! Missing data is handled differently on purpose. The telemetry view drops
//! drivers without a fastest lap and channels the lap did not record. The
//! lap-time view keeps every requested driver and reports per-driver
//! problems as [`LapTimingError`] values next to sibling data.

use serde::ser::{Serialize, SerializeMap, Serializer};

mod lap_times;
mod roster;
mod telemetry;

pub use lap_times::{DriverLapTimes, LapTimingError, LapTimingSeries, project_lap_times, seconds_to_minutes};
pub use roster::{DriverSummary, project_roster};
pub use telemetry::{TYRE_KEY, TelemetrySeries, project_telemetry};

/// Results keyed by requested driver code, in request order.
///
/// Serializes as a JSON object whose keys keep insertion order, so the same
/// request always yields byte-identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> DriverMap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert an entry; an existing code keeps its first value.
    pub fn insert(&mut self, code: impl Into<String>, value: T) {
        let code = code.into();
        if !self.contains(&code) {
            self.entries.push((code, value));
        }
    }

    pub fn get(&self, code: &str) -> Option<&T> {
        self.entries.iter().find(|(key, _)| key == code).map(|(_, value)| value)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == code)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for DriverMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for DriverMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Split a comma-separated request list.
///
/// Entries are trimmed, empty entries dropped and duplicates collapsed,
/// keeping the first occurrence's position.
pub fn split_codes(raw: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|code| !code.is_empty()) {
        if !codes.iter().any(|seen| seen == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_codes_trims_and_dedupes() {
        assert_eq!(split_codes("VER, PER,,VER ,HAM"), ["VER", "PER", "HAM"]);
        assert!(split_codes(" , ").is_empty());
        assert!(split_codes("").is_empty());
    }

    #[test]
    fn driver_map_keeps_insertion_order() {
        let mut map = DriverMap::new();
        map.insert("VER", 1);
        map.insert("ALO", 2);
        map.insert("VER", 3);

        assert_eq!(map.keys().collect::<Vec<_>>(), ["VER", "ALO"]);
        assert_eq!(map.get("VER"), Some(&1));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"VER":1,"ALO":2}"#);
    }
}
