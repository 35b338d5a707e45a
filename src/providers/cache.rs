//! Cache provider backed by the on-disk timing-data cache

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::provider::TimingProvider;
use crate::schema::{Event, EventSchedule, parse_schedule, parse_session_document};
use crate::session::Session;
use crate::types::{SessionCoordinate, SessionKind};
use crate::{Result, TimingError};

const SCHEDULE_FILE: &str = "schedule.yaml";

/// Provider that reads schedules and sessions from a cache directory
///
/// File access and parsing run on tokio's blocking pool so a large session
/// document never stalls the async workers.
#[derive(Debug, Clone)]
pub struct CacheProvider {
    root: Arc<PathBuf>,
}

impl CacheProvider {
    /// Open a cache rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| TimingError::file_error(&root, e))?;
        info!("Using timing cache at {}", root.display());
        Ok(Self { root: Arc::new(root) })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schedule_path(&self, year: i32) -> PathBuf {
        self.root.join(year.to_string()).join(SCHEDULE_FILE)
    }

    pub fn session_path(&self, year: i32, event: &Event, kind: SessionKind) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(event.slug())
            .join(format!("{}.yaml", kind.code()))
    }

    /// Read a season schedule (blocking).
    pub fn read_schedule(&self, year: i32) -> Result<EventSchedule> {
        let path = self.schedule_path(year);
        if !path.is_file() {
            return Err(TimingError::not_found("event schedule", year.to_string()));
        }

        let schedule = parse_schedule(&read_document(&path)?)?;
        if schedule.year != year {
            return Err(TimingError::schema(
                "schedule validation",
                format!("{} holds the {} schedule", path.display(), schedule.year),
            ));
        }
        Ok(schedule)
    }

    /// Resolve a coordinate and read its session document (blocking).
    pub fn read_session(&self, coordinate: &SessionCoordinate) -> Result<Session> {
        let unresolved = |reason: String| TimingError::session_not_found(coordinate.to_string(), reason);

        let kind = coordinate.session_kind().map_err(|_| {
            unresolved(format!("'{}' is not a known session name", coordinate.session))
        })?;

        let schedule = self.read_schedule(coordinate.year).map_err(|e| match e {
            TimingError::NotFound { .. } => {
                unresolved(format!("no event schedule cached for {}", coordinate.year))
            }
            other => other,
        })?;

        let event = schedule.find_event(&coordinate.event).ok_or_else(|| {
            unresolved(format!(
                "no event matching '{}' in the {} schedule",
                coordinate.event, coordinate.year
            ))
        })?;
        debug!(requested = %coordinate.event, event = %event.event_name, round = event.round_number, "Resolved event");

        if !event.holds(kind) {
            return Err(unresolved(format!("{} has no {} session", event.event_name, kind)));
        }

        let path = self.session_path(coordinate.year, event, kind);
        if !path.is_file() {
            return Err(unresolved(format!("{} {} is not in the cache", event.event_name, kind)));
        }

        let document = parse_session_document(&read_document(&path)?)?;
        if document.session_name != kind {
            return Err(TimingError::schema(
                "session validation",
                format!("{} holds a {} session, expected {}", path.display(), document.session_name, kind),
            ));
        }

        debug!(path = %path.display(), "Loaded session document");
        Ok(Session::new(coordinate.year, event.clone(), document))
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TimingError::file_error(path, e))
}

fn join_failure(session: String, err: tokio::task::JoinError) -> TimingError {
    TimingError::session_load_failed(session, Box::new(err))
}

#[async_trait::async_trait]
impl TimingProvider for CacheProvider {
    async fn event_schedule(&self, year: i32) -> Result<EventSchedule> {
        let provider = self.clone();
        tokio::task::spawn_blocking(move || provider.read_schedule(year))
            .await
            .map_err(|e| join_failure(format!("{} schedule", year), e))?
    }

    async fn load_session(&self, coordinate: &SessionCoordinate) -> Result<Session> {
        let provider = self.clone();
        let owned = coordinate.clone();
        tokio::task::spawn_blocking(move || provider.read_session(&owned))
            .await
            .map_err(|e| join_failure(coordinate.to_string(), e))?
    }
}
