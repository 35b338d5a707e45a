//! YAML utilities for cache document preprocessing
//!
//! Cache documents are written by external tooling and occasionally carry
//! bytes that break YAML parsers:
//! - A UTF-8 byte order mark
//! - Control characters copied from upstream driver or team names
//!
//! This module cleans raw text without parsing it.

use crate::{Result, TimingError};

/// Clean a raw cache document so it can be handed to the YAML parser.
///
/// Strips a leading byte order mark and every control character other than
/// `\n`, `\r` and `\t`. Fails when nothing but whitespace remains.
pub fn clean_yaml(raw: &str) -> Result<String> {
    let body = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let cleaned: String = body
        .chars()
        .filter(|&ch| !ch.is_control() || matches!(ch, '\n' | '\r' | '\t'))
        .collect();

    if cleaned.trim().is_empty() {
        return Err(TimingError::parse("YAML preprocessing", "document is empty after preprocessing"));
    }

    Ok(cleaned)
}
