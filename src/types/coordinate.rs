//! Session coordinates as requested by callers

use std::fmt;

use super::SessionKind;
use crate::Result;

/// A (year, event, session) triple identifying one session.
///
/// Built per request from raw path segments. The event may be a round
/// number or a name; the session may be a short code or a long name. Neither
/// is resolved here, see [`SessionResolver`](crate::SessionResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionCoordinate {
    pub year: i32,
    pub event: String,
    pub session: String,
}

impl SessionCoordinate {
    pub fn new(year: i32, event: impl Into<String>, session: impl Into<String>) -> Self {
        Self { year, event: event.into(), session: session.into() }
    }

    /// Parse the session name into a [`SessionKind`].
    pub fn session_kind(&self) -> Result<SessionKind> {
        self.session.parse()
    }
}

impl fmt::Display for SessionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event, self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_all_parts() {
        let coord = SessionCoordinate::new(2023, "Bahrain", "R");
        assert_eq!(coord.to_string(), "2023 Bahrain R");
        assert_eq!(coord.session_kind().unwrap(), SessionKind::Race);
    }
}
