use serde::Serialize;

use crate::session::Session;
use crate::tyre::{self, TyreCompound};

/// One roster row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriverSummary {
    pub abbreviation: String,
    pub full_name: String,
    /// Compound of the driver's fastest lap
    pub tyre_compound: TyreCompound,
}

/// Summarize every driver in listing order.
///
/// A driver without a timed lap still appears, tagged `Unknown`.
pub fn project_roster(session: &Session) -> Vec<DriverSummary> {
    session
        .drivers()
        .iter()
        .map(|driver| {
            let laps = session.laps_for(&driver.driver_number);
            DriverSummary {
                abbreviation: driver.abbreviation.clone(),
                full_name: driver.full_name.clone(),
                tyre_compound: tyre::resolve_optional(laps.fastest()),
            }
        })
        .collect()
}
