//! Data models for carhire
//!
//! Records mirror the backend's camelCase JSON. Status and role strings are
//! matched case-insensitively because the backend is not consistent about it.

mod car;
mod payment;
mod rental;
mod user;

pub use car::*;
pub use payment::*;
pub use rental::*;
pub use user::*;

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a string-backed enum through its `FromStr` impl
pub(crate) fn from_str_insensitive<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Numeric prefix of a string, the way a browser's `parseFloat` reads it
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("invalid number pattern")
});

pub(crate) fn leading_number(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().trim().parse().ok())
}

/// Numbers may arrive as numeric strings or null; anything unreadable counts as zero
pub(crate) fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(&s).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// `null` reads as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error returned when a status or role string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
