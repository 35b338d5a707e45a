//! Season schedule structures
//!
//! One `schedule.yaml` per season lists the events in round order, the
//! sessions held at each, and the event date.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::SessionKind;

/// Event schedule for one season
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EventSchedule {
    /// Championship year
    pub year: i32,
    /// Events in round order
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single event (race weekend or testing)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Championship round, 0 for testing
    pub round_number: u32,
    /// Host country
    #[serde(default)]
    pub country: String,
    /// Circuit location (city or region)
    #[serde(default)]
    pub location: String,
    /// Official event name
    pub event_name: String,
    /// Date of the main session
    #[serde(deserialize_with = "deserialize_event_date")]
    pub event_date: NaiveDateTime,
    /// Sessions held at this event, empty when the schedule does not say
    #[serde(default)]
    pub sessions: Vec<SessionKind>,
}

impl Event {
    /// Whether the event schedules the given session.
    ///
    /// Schedules that do not list sessions accept any session name; the
    /// session document lookup decides.
    pub fn holds(&self, kind: SessionKind) -> bool {
        self.sessions.is_empty() || self.sessions.contains(&kind)
    }

    /// Directory name of this event inside the season's cache directory.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.event_name.len());
        let mut pending_sep = false;
        for ch in self.event_name.chars() {
            if ch.is_alphanumeric() {
                if pending_sep && !slug.is_empty() {
                    slug.push('_');
                }
                pending_sep = false;
                slug.extend(ch.to_lowercase());
            } else {
                pending_sep = true;
            }
        }
        slug
    }
}

impl EventSchedule {
    /// Championship events, skipping testing (round 0).
    pub fn championship_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|event| event.round_number > 0)
    }

    /// Find a championship event by round number or by name.
    ///
    /// A numeric identifier is a round number. Otherwise the identifier is
    /// compared case-insensitively against event name, location and country
    /// in that order, and finally as a substring of the event name. Testing
    /// events never match.
    pub fn find_event(&self, identifier: &str) -> Option<&Event> {
        let wanted = identifier.trim();
        if wanted.is_empty() {
            return None;
        }

        if let Ok(round) = wanted.parse::<u32>() {
            return self.championship_events().find(|event| event.round_number == round);
        }

        let lowered = wanted.to_lowercase();
        self.championship_events()
            .find(|event| event.event_name.eq_ignore_ascii_case(wanted))
            .or_else(|| self.championship_events().find(|e| e.location.eq_ignore_ascii_case(wanted)))
            .or_else(|| self.championship_events().find(|e| e.country.eq_ignore_ascii_case(wanted)))
            .or_else(|| {
                self.championship_events()
                    .find(|event| event.event_name.to_lowercase().contains(&lowered))
            })
    }
}

/// Accept either a full timestamp or a bare date.
fn deserialize_event_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| serde::de::Error::custom(format!("invalid EventDate '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> EventSchedule {
        let yaml = r#"
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
    EventDate: "2023-03-05T00:00:00"
    Sessions: [Practice 1, Practice 2, Practice 3, Qualifying, Race]
  - RoundNumber: 4
    Country: Azerbaijan
    Location: Baku
    EventName: Azerbaijan Grand Prix
    EventDate: "2023-04-30"
    Sessions: [FP1, Q, SS, S, R]
"#;
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn finds_by_round_and_names() {
        let schedule = schedule();
        assert_eq!(schedule.find_event("1").unwrap().event_name, "Bahrain Grand Prix");
        assert_eq!(schedule.find_event("bahrain grand prix").unwrap().round_number, 1);
        assert_eq!(schedule.find_event("Baku").unwrap().round_number, 4);
        assert_eq!(schedule.find_event("Azerbaijan").unwrap().round_number, 4);
        assert_eq!(schedule.find_event("grand prix").unwrap().round_number, 1);
    }

    #[test]
    fn testing_events_are_skipped() {
        // Testing and round 1 share a country
        let schedule = schedule();
        assert_eq!(schedule.find_event("Bahrain").unwrap().round_number, 1);
        assert!(schedule.find_event("Pre-Season Testing").is_none());
        assert_eq!(schedule.championship_events().count(), 2);
    }

    #[test]
    fn round_zero_and_unknown_do_not_match() {
        let schedule = schedule();
        assert!(schedule.find_event("0").is_none());
        assert!(schedule.find_event("99").is_none());
        assert!(schedule.find_event("Atlantis").is_none());
        assert!(schedule.find_event("  ").is_none());
    }

    #[test]
    fn event_dates_accept_date_or_timestamp() {
        let schedule = schedule();
        let expected = NaiveDate::from_ymd_opt(2023, 3, 5).unwrap().and_time(chrono::NaiveTime::MIN);
        assert_eq!(schedule.events[1].event_date, expected);
        assert_eq!(schedule.events[0].event_date.date(), NaiveDate::from_ymd_opt(2023, 2, 25).unwrap());
    }

    #[test]
    fn holds_checks_listed_sessions() {
        let schedule = schedule();
        assert!(schedule.events[1].holds(SessionKind::Race));
        assert!(!schedule.events[1].holds(SessionKind::Sprint));
        assert!(schedule.events[2].holds(SessionKind::SprintShootout));
        // No sessions listed means no restriction
        assert!(schedule.events[0].holds(SessionKind::Practice2));
    }

    #[test]
    fn slug_collapses_separators() {
        let schedule = schedule();
        assert_eq!(schedule.events[1].slug(), "bahrain_grand_prix");
        assert_eq!(schedule.events[0].slug(), "pre_season_testing");
    }
}
