//! Provider trait for timing data sources

use crate::Result;
use crate::schema::EventSchedule;
use crate::session::Session;
use crate::types::SessionCoordinate;

/// Trait for timing-data sources
///
/// A provider owns fetching, parsing and caching. It is shared by every
/// in-flight request, so implementations must be safe for concurrent use;
/// nothing above this trait locks on their behalf.
#[async_trait::async_trait]
pub trait TimingProvider: Send + Sync + 'static {
    /// Get the event schedule of one season
    ///
    /// Returns:
    /// - `Ok(schedule)` - Schedule in round order
    /// - `Err(e)` - Season unknown or unreadable
    async fn event_schedule(&self, year: i32) -> Result<EventSchedule>;

    /// Load one session completely (drivers, laps, telemetry)
    ///
    /// This is the single expensive step of a request. Every call produces
    /// a fresh handle; callers do not share handles across requests.
    async fn load_session(&self, coordinate: &SessionCoordinate) -> Result<Session>;
}
