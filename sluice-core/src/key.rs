// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sluice_error::{Result, SluiceError};
use std::fmt::{self, Display};

/// Scalar classification or position marker carried by every [`Item`](crate::Item).
///
/// Keys are restricted to booleans, integers and strings. The derived order
/// (`Bool < Int < Str`, then by payload) agrees with the natural order of the
/// corresponding [`Value`]s, so sorting by key and sorting by
/// `key.to_value()` give the same result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Key {
    /// The key as a dynamic value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Str(s) => Value::String(s.clone()),
        }
    }

    /// Convert a label produced by a strategy into a key.
    ///
    /// # Errors
    /// Returns [`SluiceError::ContractViolation`] when the value is not a
    /// boolean, an integer or a string.
    pub fn from_label(label: Value, origin: &str) -> Result<Self> {
        match label {
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::Str(s)),
            Value::Number(n) => n.as_i64().map(Self::Int).ok_or_else(|| {
                SluiceError::contract_violation(format!(
                    "{origin} returned {n}, expected a string, an integer or a boolean"
                ))
            }),
            other => Err(SluiceError::contract_violation(format!(
                "{origin} returned {other}, expected a string, an integer or a boolean"
            ))),
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = SluiceError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_label(value, "value")
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Self::Bool(b),
            Key::Int(i) => Self::from(i),
            Key::Str(s) => Self::String(s),
        }
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
