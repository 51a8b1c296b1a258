//! Serde helpers for request payloads.
//!
//! Clients send blank strings and explicit nulls for fields they leave empty;
//! these helpers normalize both to the field's "absent" value.

use serde::{Deserialize, Deserializer};

use crate::wishlist::DEFAULT_PRIORITY;

/// Deserialize an optional string, trimming it and treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Deserialize an item priority, treating null as the default priority.
pub fn deserialize_priority<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let priority: Option<i32> = Option::deserialize(deserializer)?;
    Ok(priority.unwrap_or(DEFAULT_PRIORITY))
}

/// Default for `#[serde(default = ...)]` on priority fields.
pub fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}
