//! Core request-side types.
//!
//! - [`SessionCoordinate`] is the raw (year, event, session) triple a caller asks for
//! - [`SessionKind`] is the parsed session name (`FP1`, `Q`, `R`, ...)

mod coordinate;
mod session_kind;

pub use coordinate::SessionCoordinate;
pub use session_kind::SessionKind;
