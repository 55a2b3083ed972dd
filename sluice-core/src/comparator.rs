// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Three-way comparison of values and items.
//!
//! A [`Comparator`] comes in two arities: a binary comparison of two values,
//! or a quaternary comparison that also sees both keys. [`ItemComparator`]
//! binds a comparator to a [`Check`] mode and validates the combination once,
//! when the pipeline is configured.

use crate::check::Check;
use crate::item::Item;
use crate::key::Key;
use crate::value::{compare_values, size_of};
use serde_json::Value;
use sluice_error::{Result, SluiceError};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub type BinaryComparison = dyn Fn(&Value, &Value) -> Ordering + Send + Sync;
pub type QuaternaryComparison = dyn Fn(&Value, &Value, &Key, &Key) -> Ordering + Send + Sync;

#[derive(Clone, Default)]
pub enum Comparator {
    /// The natural order of values and keys.
    #[default]
    Natural,
    /// `(a, b) -> Ordering`
    Binary(Arc<BinaryComparison>),
    /// `(value_a, value_b, key_a, key_b) -> Ordering`
    Quaternary(Arc<QuaternaryComparison>),
}

impl Comparator {
    pub fn binary<F>(comparison: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        Self::Binary(Arc::new(comparison))
    }

    pub fn quaternary<F>(comparison: F) -> Self
    where
        F: Fn(&Value, &Value, &Key, &Key) -> Ordering + Send + Sync + 'static,
    {
        Self::Quaternary(Arc::new(comparison))
    }

    /// The natural order, descending.
    #[must_use]
    pub fn reversed() -> Self {
        Self::binary(|a, b| compare_values(b, a))
    }

    /// Compares objects field by field; a field spec may end in ` desc`.
    ///
    /// Missing fields compare as `null`.
    #[must_use]
    pub fn by_fields(fields: &[&str]) -> Self {
        let specs: Vec<(String, bool)> = fields
            .iter()
            .map(|spec| match spec.trim().strip_suffix(" desc") {
                Some(name) => (name.trim().to_string(), true),
                None => (
                    spec.trim().trim_end_matches(" asc").trim().to_string(),
                    false,
                ),
            })
            .collect();

        Self::binary(move |a, b| {
            specs
                .iter()
                .map(|(field, descending)| {
                    let ord = compare_values(
                        a.get(field).unwrap_or(&Value::Null),
                        b.get(field).unwrap_or(&Value::Null),
                    );
                    if *descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Compares collection sizes and string lengths.
    #[must_use]
    pub fn by_size() -> Self {
        Self::binary(|a, b| size_of(a).cmp(&size_of(b)))
    }

    /// The first non-equal result of `comparators`, in order.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] if any of them is quaternary.
    pub fn multi(comparators: Vec<Comparator>) -> Result<Self> {
        if comparators
            .iter()
            .any(|c| matches!(c, Comparator::Quaternary(_)))
        {
            return Err(SluiceError::invalid_argument(
                "multi comparator accepts only two-argument comparators",
            ));
        }

        Ok(Self::binary(move |a, b| {
            comparators
                .iter()
                .map(|c| c.compare(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }))
    }

    /// Number of arguments the comparison takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Natural | Self::Binary(_) => 2,
            Self::Quaternary(_) => 4,
        }
    }

    /// Compare two bare values. A quaternary comparison sees both keys as `0`.
    #[must_use]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match self {
            Self::Natural => compare_values(a, b),
            Self::Binary(f) => f(a, b),
            Self::Quaternary(f) => f(a, b, &Key::default(), &Key::default()),
        }
    }

    fn compare_keys(&self, a: &Key, b: &Key) -> Ordering {
        match self {
            Self::Natural => a.cmp(b),
            other => other.compare(&a.to_value(), &b.to_value()),
        }
    }
}

impl Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural => f.write_str("Comparator::Natural"),
            Self::Binary(_) => f.write_str("Comparator::Binary(..)"),
            Self::Quaternary(_) => f.write_str("Comparator::Quaternary(..)"),
        }
    }
}

/// A comparator bound to the part of the item it orders by.
#[derive(Debug, Clone)]
pub struct ItemComparator {
    comparator: Comparator,
    mode: Check,
}

impl ItemComparator {
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] for [`Check::Any`], which
    /// does not define an order, and for a quaternary comparator in
    /// [`Check::Value`] or [`Check::Key`] mode.
    pub fn new(comparator: Comparator, mode: Check) -> Result<Self> {
        match (&comparator, mode) {
            (_, Check::Any) => Err(SluiceError::invalid_argument(
                "mode Any cannot be used to order items",
            )),
            (Comparator::Quaternary(_), Check::Value | Check::Key) => {
                Err(SluiceError::invalid_argument(format!(
                    "a four-argument comparator requires mode Both, got {mode:?}"
                )))
            }
            _ => Ok(Self { comparator, mode }),
        }
    }

    #[must_use]
    pub fn natural() -> Self {
        Self {
            comparator: Comparator::Natural,
            mode: Check::Value,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Check {
        self.mode
    }

    /// Order `a` relative to `b`. In mode Both values decide first and keys break ties.
    #[must_use]
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match (&self.comparator, self.mode) {
            (Comparator::Quaternary(f), _) => f(&a.value, &b.value, &a.key, &b.key),
            (c, Check::Value) => c.compare(&a.value, &b.value),
            (c, Check::Key) => c.compare_keys(&a.key, &b.key),
            (c, _) => c
                .compare(&a.value, &b.value)
                .then_with(|| c.compare_keys(&a.key, &b.key)),
        }
    }
}
