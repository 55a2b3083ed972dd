// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::Value;
use sluice_core::comparator::BinaryComparison;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Remembered values, partitioned by type so the common cases hash.
///
/// Membership is strict equality: `1` and `1.0` differ, as do `true` and `1`.
#[derive(Debug, Default)]
pub(crate) struct ValueSet {
    ints: HashSet<i64>,
    strings: HashSet<String>,
    others: Vec<Value>,
}

impl ValueSet {
    fn contains(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.strings.contains(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => self.ints.contains(&i),
                None => self.others.contains(value),
            },
            _ => self.others.contains(value),
        }
    }

    fn insert(&mut self, value: Value) {
        match value {
            Value::String(s) => {
                self.strings.insert(s);
            }
            Value::Number(ref n) if n.is_i64() => {
                if let Some(i) = n.as_i64() {
                    self.ints.insert(i);
                }
            }
            other => self.others.push(other),
        }
    }

    fn clear(&mut self) {
        self.ints.clear();
        self.strings.clear();
        self.others.clear();
    }
}

/// One side (values or keys) of what a uniqueness check has accepted so far.
pub(crate) enum Store {
    Natural(ValueSet),
    /// Linear scan; a user comparison has no hash to go with it.
    Scan {
        comparison: Arc<BinaryComparison>,
        seen: Vec<Value>,
    },
}

impl Store {
    pub(crate) fn natural() -> Self {
        Self::Natural(ValueSet::default())
    }

    pub(crate) fn scan(comparison: Arc<BinaryComparison>) -> Self {
        Self::Scan {
            comparison,
            seen: Vec::new(),
        }
    }

    pub(crate) fn contains(&self, value: &Value) -> bool {
        match self {
            Self::Natural(set) => set.contains(value),
            Self::Scan { comparison, seen } => seen
                .iter()
                .any(|known| comparison(value, known) == Ordering::Equal),
        }
    }

    pub(crate) fn remember(&mut self, value: Value) {
        match self {
            Self::Natural(set) => set.insert(value),
            Self::Scan { seen, .. } => seen.push(value),
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            Self::Natural(set) => set.clear(),
            Self::Scan { seen, .. } => seen.clear(),
        }
    }
}
