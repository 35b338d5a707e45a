//! Driver information structures

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Individual driver entry from a session's driver list
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DriverInfo {
    /// Permanent car number, the provider's driver key
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub driver_number: String,
    /// Three-letter abbreviation (e.g. VER)
    pub abbreviation: String,
    /// Full display name
    #[serde(default)]
    pub full_name: String,
    /// Team name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl DriverInfo {
    /// Whether a requested driver code refers to this driver.
    ///
    /// Codes match the abbreviation case-insensitively or the car number.
    pub fn matches(&self, code: &str) -> bool {
        let code = code.trim();
        self.abbreviation.eq_ignore_ascii_case(code) || self.driver_number == code
    }
}
