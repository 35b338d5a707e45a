//! Loaded session handle
//!
//! A [`Session`] is what the provider hands back for one coordinate: the
//! event it belongs to, the driver list and every lap. Projections borrow it
//! for the duration of one request and never mutate it.

use crate::schema::{DriverInfo, Event, LapRecord, LapTimeField, LapTimeValue, SessionDocument};
use crate::types::SessionKind;

/// A fully loaded, read-only session
#[derive(Debug, Clone)]
pub struct Session {
    year: i32,
    event: Event,
    kind: SessionKind,
    drivers: Vec<DriverInfo>,
    laps: Vec<LapRecord>,
    lap_time_recorded: bool,
}

impl Session {
    /// Build a session from a parsed cache document.
    ///
    /// Drivers listed twice keep their first entry. When any lap carries a
    /// lap time key, rows without one are treated as laps whose time was not
    /// set, the same way a table column is shared by all its rows.
    pub fn new(year: i32, event: Event, document: SessionDocument) -> Self {
        let mut drivers: Vec<DriverInfo> = Vec::with_capacity(document.drivers.len());
        for driver in document.drivers {
            if !drivers.iter().any(|seen| seen.driver_number == driver.driver_number) {
                drivers.push(driver);
            }
        }

        let lap_time_recorded = document.laps.iter().any(|lap| !lap.lap_time.is_absent());
        let mut laps = document.laps;
        if lap_time_recorded {
            for lap in laps.iter_mut().filter(|lap| lap.lap_time.is_absent()) {
                lap.lap_time = LapTimeField::Present(LapTimeValue::NotSet);
            }
        }

        Self { year, event, kind: document.session_name, drivers, laps, lap_time_recorded }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Drivers in the provider's listing order.
    pub fn drivers(&self) -> &[DriverInfo] {
        &self.drivers
    }

    /// Driver keys (car numbers) in listing order.
    pub fn driver_codes(&self) -> impl Iterator<Item = &str> {
        self.drivers.iter().map(|driver| driver.driver_number.as_str())
    }

    /// Look up a driver by abbreviation or car number.
    pub fn driver(&self, code: &str) -> Option<&DriverInfo> {
        self.drivers.iter().find(|driver| driver.matches(code))
    }

    /// Whether the lap time column exists in this session's lap table.
    pub fn has_lap_time_field(&self) -> bool {
        self.lap_time_recorded
    }

    /// Select a driver's laps.
    ///
    /// Codes not in the driver list still match laps recorded under that
    /// abbreviation or number; anything else yields an empty selection.
    pub fn laps_for(&self, code: &str) -> DriverLaps<'_> {
        let code = code.trim();
        let (abbreviation, number) = match self.driver(code) {
            Some(driver) => (driver.abbreviation.as_str(), Some(driver.driver_number.as_str())),
            None => (code, Some(code)),
        };

        let laps = if code.is_empty() {
            Vec::new()
        } else {
            self.laps.iter().filter(|lap| lap.belongs_to(abbreviation, number)).collect()
        };
        DriverLaps { laps }
    }
}

/// A selection of one driver's laps
#[derive(Debug, Clone)]
pub struct DriverLaps<'a> {
    laps: Vec<&'a LapRecord>,
}

impl<'a> DriverLaps<'a> {
    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LapRecord> + '_ {
        self.laps.iter().copied()
    }

    /// Order laps by ascending lap number, keeping document order on ties.
    pub fn sorted_by_lap_number(mut self) -> Self {
        self.laps.sort_by_key(|lap| lap.lap_number);
        self
    }

    /// The lap with the minimum recorded lap time.
    ///
    /// Laps without a lap time never qualify. Equal times resolve to the
    /// lowest lap number.
    pub fn fastest(&self) -> Option<&'a LapRecord> {
        self.iter()
            .filter_map(|lap| lap.duration().map(|time| (time, lap.lap_number, lap)))
            .min_by_key(|(time, number, _)| (*time, *number))
            .map(|(_, _, lap)| lap)
    }
}
