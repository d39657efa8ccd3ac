//! Patch fields that distinguish "absent" from "null"
//!
//! Used with `#[serde(default, deserialize_with = "nullable::deserialize")]`
//! on an `Option<Option<T>>`:
//!
//! - field missing: `None` (leave unchanged)
//! - field `null`: `Some(None)` (clear)
//! - field set: `Some(Some(value))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
