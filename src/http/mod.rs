//! HTTP surface
//!
//! | Method | Path                                   | Body                                          |
//! |--------|----------------------------------------|-----------------------------------------------|
//! | GET    | `/`                                    | `{"message": "API is running!"}`              |
//! | GET    | `/healthcheck`                         | `{"status": "ok"}`                            |
//! | GET    | `/races/{year}`                        | `{year, races: [{EventName, EventDate}]}`     |
//! | GET    | `/drivers/{year}/{event}/{session}`    | `{year, event, session, drivers}`             |
//! | GET    | `/telemetry/{year}/{event}/{session}`  | `{year, event, session, data}`                |
//! | GET    | `/laptimes/{year}/{event}/{session}`   | `{year, event, session, lap_times}`           |
//!
//! Telemetry takes `?drivers=VER,HAM&analyses=Speed,RPM`, lap times take
//! `?drivers=VER,HAM`. Failures answer `{"error": "<message>"}`; see
//! [`ErrorMode`] for the status code.

mod error;
mod handlers;
pub mod types;

pub use error::{ApiError, ErrorBody, ErrorMode, ErrorReply};

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::resolver::SessionResolver;
use crate::{Result, TimingError};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: SessionResolver,
    pub error_mode: ErrorMode,
}

impl AppState {
    pub fn new(resolver: SessionResolver, error_mode: ErrorMode) -> Self {
        Self { resolver, error_mode }
    }
}

/// Routes with request tracing, without CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthcheck", get(handlers::healthcheck))
        .route("/races/{year}", get(handlers::races))
        .route("/drivers/{year}/{event}/{session}", get(handlers::drivers))
        .route("/telemetry/{year}/{event}/{session}", get(handlers::telemetry))
        .route("/laptimes/{year}/{event}/{session}", get(handlers::lap_times))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The full application for a configuration.
pub fn app(config: &Config) -> Result<Router> {
    let resolver = SessionResolver::from_config(config)?;
    let cors = cors_layer(&config.cors_origins)?;
    Ok(router(AppState::new(resolver, config.error_mode())).layer(cors))
}

/// CORS for the configured origins; `*` anywhere in the list allows any.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|origin| origin.trim() == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let allowed = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| TimingError::config(format!("invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(allowed)))
}
