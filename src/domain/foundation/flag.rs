//! Boolean cells in project CSV files.

use serde::{Deserialize, Deserializer};

/// Reads an optional yes/no cell.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `y`/`n` in any case.
/// An empty cell reads as `None`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    parse_flag(&raw).map_err(serde::de::Error::custom)
}

fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "n" => Ok(Some(false)),
        other => Err(format!("not a yes/no value: {}", other)),
    }
}
