// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::key::Key;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `(key, value)` pair flowing through a pipeline.
///
/// Items are not unique: two items may share a key, a value, or both.
/// Uniqueness is something operations decide, not a property of the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub key: Key,
    pub value: Value,
}

impl Item {
    #[must_use]
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The item as a `(key, value)` tuple.
    #[must_use]
    pub fn tuple(self) -> (Key, Value) {
        (self.key, self.value)
    }

    /// The item as a two-element JSON array `[key, value]`.
    #[must_use]
    pub fn to_pair(&self) -> Value {
        Value::Array(vec![self.key.to_value(), self.value.clone()])
    }
}

impl From<(Key, Value)> for Item {
    fn from((key, value): (Key, Value)) -> Self {
        Self { key, value }
    }
}
