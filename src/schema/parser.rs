//! Cache document parsing and validation
//!
//! Every document read from the cache goes through the same steps: clean
//! the raw text, deserialize, then validate the parts the projections rely
//! on (lap numbering, telemetry sample alignment).

use tracing::debug;

use super::{EventSchedule, SessionDocument};
use crate::yaml_utils::clean_yaml;
use crate::{Result, TimingError};

/// Parse and validate a season schedule document.
pub fn parse_schedule(raw: &str) -> Result<EventSchedule> {
    let cleaned = clean_yaml(raw)?;
    let schedule: EventSchedule = serde_yaml_ng::from_str(&cleaned).map_err(|e| {
        TimingError::parse("schedule deserialization", format!("YAML parsing failed: {}", e))
    })?;

    validate_schedule(&schedule)?;
    debug!(year = schedule.year, events = schedule.events.len(), "Parsed event schedule");
    Ok(schedule)
}

/// Parse and validate a session document.
pub fn parse_session_document(raw: &str) -> Result<SessionDocument> {
    let cleaned = clean_yaml(raw)?;
    let document: SessionDocument = serde_yaml_ng::from_str(&cleaned).map_err(|e| {
        TimingError::parse("session deserialization", format!("YAML parsing failed: {}", e))
    })?;

    validate_session_document(&document)?;
    debug!(
        event = %document.event_name,
        session = %document.session_name,
        drivers = document.drivers.len(),
        laps = document.laps.len(),
        "Parsed session document"
    );
    Ok(document)
}

/// Validate a parsed schedule for completeness.
pub fn validate_schedule(schedule: &EventSchedule) -> Result<()> {
    if let Some(event) = schedule.events.iter().find(|event| event.event_name.trim().is_empty()) {
        return Err(TimingError::schema(
            "schedule validation",
            format!("round {} has no event name", event.round_number),
        ));
    }
    Ok(())
}

/// Validate a parsed session document for completeness.
pub fn validate_session_document(document: &SessionDocument) -> Result<()> {
    if document.event_name.trim().is_empty() {
        return Err(TimingError::schema("session validation", "missing event name"));
    }

    if let Some(driver) = document.drivers.iter().find(|d| d.abbreviation.trim().is_empty()) {
        return Err(TimingError::schema(
            "session validation",
            format!("driver #{} has no abbreviation", driver.driver_number),
        ));
    }

    for lap in &document.laps {
        if lap.lap_number == 0 {
            return Err(TimingError::schema(
                "session validation",
                format!("lap 0 recorded for {}; lap numbers start at 1", lap.driver),
            ));
        }

        if let Some(stream) = &lap.telemetry {
            if stream.sample_count().is_none() {
                return Err(TimingError::schema(
                    "session validation",
                    format!(
                        "telemetry channels of {} lap {} have different sample counts",
                        lap.driver, lap.lap_number
                    ),
                ));
            }
        }
    }

    Ok(())
}
