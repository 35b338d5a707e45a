//! Error types for session resolution and projection.
//!
//! Errors fall into two tiers:
//!
//! - **Whole-request failures**: anything that prevents a session handle from
//!   being produced ([`TimingError::SessionResolution`], [`TimingError::File`],
//!   [`TimingError::Parse`], [`TimingError::Timeout`], ...). These abort the
//!   request and are translated once at the HTTP boundary.
//! - **Per-driver failures**: produced only by the lap-timing projection and
//!   carried inside the response as data, see
//!   [`LapTimingError`](crate::projections::LapTimingError).
//!
//! ## Helper Constructors
//!
//! ```rust
//! use timing_tower::TimingError;
//!
//! let err = TimingError::session_not_found("2023 Bahrain Grand Prix FP4", "no such session");
//! assert!(!err.is_retryable());
//!
//! let err = TimingError::schema("LapTime", "expected a duration");
//! assert!(err.to_string().contains("LapTime"));
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for timing operations.
pub type Result<T, E = TimingError> = std::result::Result<T, E>;

/// Main error type for timing-data operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimingError {
    #[error("Failed to load session {session}: {reason}")]
    SessionResolution {
        session: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Schema error in {context}: {details}")]
    Schema { context: String, details: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Cache file error at {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Session load timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl TimingError {
    /// Returns whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TimingError::Timeout { .. } => true,
            TimingError::File { source, .. } => {
                !matches!(source.kind(), std::io::ErrorKind::NotFound)
            }
            TimingError::SessionResolution { .. } => false,
            TimingError::Schema { .. } => false,
            TimingError::NotFound { .. } => false,
            TimingError::Parse { .. } => false,
            TimingError::Config { .. } => false,
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TimingError::File { path: path.into(), source }
    }

    /// Helper constructor for a session the provider does not know about.
    pub fn session_not_found(session: impl Into<String>, reason: impl Into<String>) -> Self {
        TimingError::SessionResolution { session: session.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for a session whose load failed underneath.
    pub fn session_load_failed(
        session: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let reason = source.to_string();
        TimingError::SessionResolution { session: session.into(), reason, source: Some(source) }
    }

    /// Helper constructor for schema errors.
    pub fn schema(context: impl Into<String>, details: impl Into<String>) -> Self {
        TimingError::Schema { context: context.into(), details: details.into() }
    }

    /// Helper constructor for missing entities (schedules, events, drivers).
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        TimingError::NotFound { kind, name: name.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        TimingError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        TimingError::Config { reason: reason.into() }
    }
}

impl From<std::io::Error> for TimingError {
    fn from(err: std::io::Error) -> Self {
        TimingError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

impl From<serde_yaml_ng::Error> for TimingError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TimingError::Parse { context: "cache document".to_string(), details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn error_messages_carry_their_context(
            session in "[A-Za-z0-9 ]{1,40}",
            reason in "[a-z ]{1,40}",
            field in "\\w+",
            details in "[a-z ]{1,40}",
        ) {
            let resolution = TimingError::session_not_found(session.clone(), reason.clone());
            let msg = resolution.to_string();
            prop_assert!(msg.contains(&session));
            prop_assert!(msg.contains(&reason));

            let schema = TimingError::schema(field.clone(), details.clone());
            let msg = schema.to_string();
            prop_assert!(msg.contains(&field));
            prop_assert!(msg.contains(&details));
        }

        #[test]
        fn io_conversion_preserves_message(reason in "[a-z]{1,30}") {
            let io_err = std::io::Error::other(reason.clone());
            let converted: TimingError = io_err.into();
            match converted {
                TimingError::File { source, .. } => prop_assert_eq!(source.to_string(), reason),
                _ => prop_assert!(false, "Expected File error from io::Error conversion"),
            }
        }
    }

    #[test]
    fn load_failure_keeps_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated document");
        let err = TimingError::session_load_failed("2023 Bahrain Grand Prix Race", Box::new(io_err));

        assert!(err.to_string().contains("truncated document"));
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert_eq!(source.to_string(), "truncated document");
    }

    #[test]
    fn retry_classification() {
        assert!(TimingError::Timeout { duration: Duration::from_secs(5) }.is_retryable());
        assert!(!TimingError::not_found("driver", "BADCODE").is_retryable());
        assert!(!TimingError::schema("LapTime", "missing").is_retryable());

        let missing = TimingError::file_error(
            "/tmp/f1_cache/2023/schedule.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!missing.is_retryable());

        let denied = TimingError::file_error(
            "/tmp/f1_cache/2023/schedule.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(denied.is_retryable());
    }

    #[test]
    fn error_is_send_sync_static() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TimingError>();
    }
}
