//! Session resolution
//!
//! [`SessionResolver`] turns a (year, event, session) request into a loaded
//! [`Session`]. It is the only place that talks to the provider and the only
//! place a request can wait on I/O; the projections that follow are pure.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::provider::TimingProvider;
use crate::providers::CacheProvider;
use crate::schema::EventSchedule;
use crate::session::Session;
use crate::types::SessionCoordinate;
use crate::{Result, TimingError};

/// Resolves session coordinates through a provider
#[derive(Clone)]
pub struct SessionResolver {
    provider: Arc<dyn TimingProvider>,
    load_timeout: Option<Duration>,
}

impl SessionResolver {
    /// Create a resolver over any provider.
    ///
    /// `load_timeout` bounds each provider call; `None` waits indefinitely.
    pub fn new(provider: Arc<dyn TimingProvider>, load_timeout: Option<Duration>) -> Self {
        Self { provider, load_timeout }
    }

    /// Create a resolver over the on-disk cache named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = CacheProvider::new(&config.cache_dir)?;
        Ok(Self::new(Arc::new(provider), config.load_timeout()))
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout
    }

    /// Resolve and load one session.
    #[instrument(skip(self), fields(timeout = ?self.load_timeout))]
    pub async fn resolve(&self, year: i32, event: &str, session: &str) -> Result<Session> {
        let coordinate = SessionCoordinate::new(year, event, session);
        let loaded = self.bounded(self.provider.load_session(&coordinate)).await?;
        debug!(
            event = %loaded.event().event_name,
            session = %loaded.kind(),
            drivers = loaded.drivers().len(),
            "Session resolved"
        );
        Ok(loaded)
    }

    /// Load a season's event schedule.
    #[instrument(skip(self))]
    pub async fn schedule(&self, year: i32) -> Result<EventSchedule> {
        self.bounded(self.provider.event_schedule(year)).await
    }

    /// Await a provider load under the configured timeout.
    ///
    /// A timeout drops the future only. Work the provider already handed to
    /// the blocking pool (file read, parse) runs to completion and its result
    /// is discarded.
    async fn bounded<T>(&self, load: impl Future<Output = Result<T>>) -> Result<T> {
        match self.load_timeout {
            Some(duration) => match tokio::time::timeout(duration, load).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Provider load exceeded {:?}", duration);
                    Err(TimingError::Timeout { duration })
                }
            },
            None => load.await,
        }
    }
}
