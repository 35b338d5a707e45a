//! Motorsport session data over HTTP.
//!
//! Timing Tower serves season schedules, driver rosters, fastest-lap
//! telemetry and lap-time series from a local timing-data cache.
//!
//! # Pipeline
//!
//! Every data request runs the same two steps:
//!
//! 1. [`SessionResolver`] turns `(year, event, session)` into a loaded
//!    [`Session`], bounded by the configured load timeout.
//! 2. Exactly one projection reshapes it: [`projections::project_roster`],
//!    [`projections::project_telemetry`] or [`projections::project_lap_times`].
//!
//! Tyre compounds are resolved in one place for all three, see [`tyre`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use timing_tower::{Config, SessionResolver, projections};
//!
//! #[tokio::main]
//! async fn main() -> timing_tower::Result<()> {
//!     let config = Config::with_cache_dir("/var/cache/f1");
//!     let resolver = SessionResolver::from_config(&config)?;
//!
//!     let session = resolver.resolve(2023, "Bahrain", "R").await?;
//!     for driver in projections::project_roster(&session) {
//!         println!("{} {}", driver.abbreviation, driver.tyre_compound);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;
mod yaml_utils;

// Data access
pub mod provider;
pub mod providers;
pub mod resolver;
pub mod schema;
pub mod session;

// Reshaping
pub mod projections;
pub mod tyre;

// Service surface
pub mod http;
pub mod logging;

// Core exports
pub use config::Config;
pub use error::*;
pub use types::*;

// Main API exports
pub use provider::TimingProvider;
pub use providers::CacheProvider;
pub use resolver::SessionResolver;
pub use session::{DriverLaps, Session};
pub use tyre::{Compound, TyreCompound};
