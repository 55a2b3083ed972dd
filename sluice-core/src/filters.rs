// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filter contract and a handful of common filters.
//!
//! Any `FnMut(&Value) -> bool` closure is a [`Filter`]. The [`Check`] mode
//! passed by the engine decides what the closure is applied to: the value,
//! the key (as a value), both (logical and) or either (logical or).
//!
//! ```
//! use serde_json::json;
//! use sluice_core::{filters, Check, Filter, Key};
//!
//! let mut positive = |v: &serde_json::Value| v.as_i64().is_some_and(|n| n > 0);
//! assert!(positive.is_allowed(&json!(3), &Key::Int(-1), Check::Value).unwrap());
//! assert!(!positive.is_allowed(&json!(3), &Key::Int(-1), Check::Both).unwrap());
//! assert!(positive.is_allowed(&json!(3), &Key::Int(-1), Check::Any).unwrap());
//!
//! let mut ints = filters::is_int();
//! assert!(!ints.is_allowed(&json!("a"), &Key::Int(0), Check::Value).unwrap());
//! ```

use crate::check::Check;
use crate::key::Key;
use serde_json::Value;
use sluice_error::Result;

/// Decides whether an item passes.
pub trait Filter: Send {
    /// # Errors
    /// Returns a data error when user code fails while deciding.
    fn is_allowed(&mut self, value: &Value, key: &Key, mode: Check) -> Result<bool>;
}

impl<F> Filter for F
where
    F: FnMut(&Value) -> bool + Send,
{
    fn is_allowed(&mut self, value: &Value, key: &Key, mode: Check) -> Result<bool> {
        Ok(match mode {
            Check::Value => self(value),
            Check::Key => self(&key.to_value()),
            Check::Both => self(value) && self(&key.to_value()),
            Check::Any => self(value) || self(&key.to_value()),
        })
    }
}

/// Filter that sees the whole item and ignores the mode.
pub struct ItemFilter<F>(F);

impl<F> Filter for ItemFilter<F>
where
    F: FnMut(&Value, &Key) -> bool + Send,
{
    fn is_allowed(&mut self, value: &Value, key: &Key, _mode: Check) -> Result<bool> {
        Ok((self.0)(value, key))
    }
}

/// Filter whose predicate may fail.
pub struct FallibleFilter<F>(F);

impl<F> Filter for FallibleFilter<F>
where
    F: FnMut(&Value) -> Result<bool> + Send,
{
    fn is_allowed(&mut self, value: &Value, key: &Key, mode: Check) -> Result<bool> {
        Ok(match mode {
            Check::Value => (self.0)(value)?,
            Check::Key => (self.0)(&key.to_value())?,
            Check::Both => (self.0)(value)? && (self.0)(&key.to_value())?,
            Check::Any => (self.0)(value)? || (self.0)(&key.to_value())?,
        })
    }
}

/// Negation of another filter.
pub struct Not<F>(F);

impl<F: Filter> Filter for Not<F> {
    fn is_allowed(&mut self, value: &Value, key: &Key, mode: Check) -> Result<bool> {
        self.0.is_allowed(value, key, mode).map(|allowed| !allowed)
    }
}

/// A filter over `(value, key)` pairs.
pub fn by_item<F>(predicate: F) -> ItemFilter<F>
where
    F: FnMut(&Value, &Key) -> bool + Send,
{
    ItemFilter(predicate)
}

/// A filter whose predicate may fail with a data error.
pub fn fallible<F>(predicate: F) -> FallibleFilter<F>
where
    F: FnMut(&Value) -> Result<bool> + Send,
{
    FallibleFilter(predicate)
}

/// Inverts `filter`.
pub fn not<F: Filter>(filter: F) -> Not<F> {
    Not(filter)
}

#[must_use]
pub fn is_int() -> impl Filter {
    |v: &Value| v.is_i64() || v.is_u64()
}

#[must_use]
pub fn is_string() -> impl Filter {
    |v: &Value| v.is_string()
}

#[must_use]
pub fn is_number() -> impl Filter {
    |v: &Value| v.is_number()
}

#[must_use]
pub fn is_null() -> impl Filter {
    |v: &Value| v.is_null()
}

/// Integers divisible by two.
#[must_use]
pub fn is_even() -> impl Filter {
    |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0)
}

#[must_use]
pub fn greater_than(bound: f64) -> impl Filter {
    move |v: &Value| v.as_f64().is_some_and(|n| n > bound)
}

#[must_use]
pub fn less_than(bound: f64) -> impl Filter {
    move |v: &Value| v.as_f64().is_some_and(|n| n < bound)
}

/// Values equal to one of `allowed`.
#[must_use]
pub fn only_in(allowed: Vec<Value>) -> impl Filter {
    move |v: &Value| allowed.contains(v)
}
