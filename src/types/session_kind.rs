//! Session naming within a race weekend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TimingError;

/// One scheduled on-track activity within an event.
///
/// Parses from both the short codes used in URLs (`FP1`, `Q`, `R`, ...) and
/// the long names used by event schedules (`Practice 1`, `Race`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SessionKind {
    Practice1,
    Practice2,
    Practice3,
    Qualifying,
    Sprint,
    SprintQualifying,
    SprintShootout,
    Race,
}

impl SessionKind {
    pub const ALL: [SessionKind; 8] = [
        SessionKind::Practice1,
        SessionKind::Practice2,
        SessionKind::Practice3,
        SessionKind::Qualifying,
        SessionKind::Sprint,
        SessionKind::SprintQualifying,
        SessionKind::SprintShootout,
        SessionKind::Race,
    ];

    /// Short code, also used as the cache file stem.
    pub fn code(self) -> &'static str {
        match self {
            SessionKind::Practice1 => "FP1",
            SessionKind::Practice2 => "FP2",
            SessionKind::Practice3 => "FP3",
            SessionKind::Qualifying => "Q",
            SessionKind::Sprint => "S",
            SessionKind::SprintQualifying => "SQ",
            SessionKind::SprintShootout => "SS",
            SessionKind::Race => "R",
        }
    }

    /// Long name as it appears in event schedules.
    pub fn name(self) -> &'static str {
        match self {
            SessionKind::Practice1 => "Practice 1",
            SessionKind::Practice2 => "Practice 2",
            SessionKind::Practice3 => "Practice 3",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Sprint => "Sprint",
            SessionKind::SprintQualifying => "Sprint Qualifying",
            SessionKind::SprintShootout => "Sprint Shootout",
            SessionKind::Race => "Race",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SessionKind {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SessionKind::ALL
            .into_iter()
            .find(|kind| {
                kind.code().eq_ignore_ascii_case(wanted) || kind.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| TimingError::parse("session name", format!("unknown session '{}'", wanted)))
    }
}

impl TryFrom<String> for SessionKind {
    type Error = TimingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionKind> for String {
    fn from(kind: SessionKind) -> Self {
        kind.name().to_string()
    }
}
