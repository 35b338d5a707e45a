//! Tyre compound resolution
//!
//! The provider has published a lap's compound under two field names over
//! time. Resolution tries the current name, then the legacy one, and falls
//! back to [`TyreCompound::Unknown`]. Callers never look at the raw fields.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::schema::LapRecord;

/// Text emitted when no compound can be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Tyre compound category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    Hypersoft,
    Ultrasoft,
    Supersoft,
    Superhard,
    TestUnknown,
    /// A compound label outside the known vocabulary, upper-cased
    Other(String),
}

impl Compound {
    /// Parse a raw field value.
    ///
    /// Returns `None` for values that carry no information: empty text,
    /// `UNKNOWN`, `nan`, `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.trim().to_ascii_uppercase();
        let compound = match label.as_str() {
            "" | "UNKNOWN" | "NAN" | "NONE" | "NULL" => return None,
            "SOFT" => Compound::Soft,
            "MEDIUM" => Compound::Medium,
            "HARD" => Compound::Hard,
            "INTERMEDIATE" => Compound::Intermediate,
            "WET" => Compound::Wet,
            "HYPERSOFT" => Compound::Hypersoft,
            "ULTRASOFT" => Compound::Ultrasoft,
            "SUPERSOFT" => Compound::Supersoft,
            "SUPERHARD" => Compound::Superhard,
            "TEST_UNKNOWN" => Compound::TestUnknown,
            _ => Compound::Other(label),
        };
        Some(compound)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
            Compound::Hypersoft => "HYPERSOFT",
            Compound::Ultrasoft => "ULTRASOFT",
            Compound::Supersoft => "SUPERSOFT",
            Compound::Superhard => "SUPERHARD",
            Compound::TestUnknown => "TEST_UNKNOWN",
            Compound::Other(label) => label,
        }
    }
}

/// Resolved compound of a lap
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TyreCompound {
    Known(Compound),
    #[default]
    Unknown,
}

impl TyreCompound {
    pub fn as_str(&self) -> &str {
        match self {
            TyreCompound::Known(compound) => compound.as_str(),
            TyreCompound::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for TyreCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TyreCompound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Resolve a lap's compound: primary field, then legacy field, then unknown.
pub fn resolve_compound(lap: &LapRecord) -> TyreCompound {
    [lap.compound.as_deref(), lap.tyre_compound.as_deref()]
        .into_iter()
        .flatten()
        .find_map(Compound::parse)
        .map(TyreCompound::Known)
        .unwrap_or(TyreCompound::Unknown)
}

/// Resolve the compound of an optional lap; a missing lap is unknown.
pub fn resolve_optional(lap: Option<&LapRecord>) -> TyreCompound {
    lap.map(resolve_compound).unwrap_or_default()
}
