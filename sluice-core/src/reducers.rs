// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reducer contract and the built-in reducers.

use crate::value::{compare_values, display_value};
use serde_json::Value;
use sluice_error::{Result, SluiceError};
use std::cmp::Ordering;

/// Folds consumed values into an accumulator.
pub trait Reducer: Send {
    /// # Errors
    /// Returns a data error when the value cannot be accumulated.
    fn consume(&mut self, value: Value) -> Result<()>;

    /// The accumulated result; `None` until something was consumed.
    fn result(&self) -> Option<Value>;

    /// Forget everything consumed so far.
    fn reset(&mut self);
}

#[derive(Debug, Default)]
pub struct Sum {
    int: i64,
    float: f64,
    is_float: bool,
    seen: bool,
}

impl Reducer for Sum {
    fn consume(&mut self, value: Value) -> Result<()> {
        let Value::Number(number) = &value else {
            return Err(SluiceError::stream_error(format!(
                "sum expects numbers, got {value}"
            )));
        };
        self.seen = true;

        match number.as_i64() {
            Some(n) if !self.is_float => match self.int.checked_add(n) {
                Some(total) => self.int = total,
                None => self.promote(n as f64),
            },
            _ => self.promote(number.as_f64().unwrap_or_default()),
        }
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        if !self.seen {
            None
        } else if self.is_float {
            Some(Value::from(self.float))
        } else {
            Some(Value::from(self.int))
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Sum {
    fn promote(&mut self, addend: f64) {
        if !self.is_float {
            self.is_float = true;
            self.float = self.int as f64;
        }
        self.float += addend;
    }
}

/// Keeps the value that compares `keep` against every other.
#[derive(Debug)]
pub struct Extreme {
    keep: Ordering,
    current: Option<Value>,
}

impl Reducer for Extreme {
    fn consume(&mut self, value: Value) -> Result<()> {
        match &self.current {
            Some(current) if compare_values(&value, current) != self.keep => {}
            _ => self.current = Some(value),
        }
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        self.current.clone()
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

#[derive(Debug)]
pub struct Concat {
    separator: String,
    parts: Vec<String>,
}

impl Reducer for Concat {
    fn consume(&mut self, value: Value) -> Result<()> {
        self.parts.push(display_value(&value));
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        (!self.parts.is_empty()).then(|| Value::from(self.parts.join(&self.separator)))
    }

    fn reset(&mut self) {
        self.parts.clear();
    }
}

#[derive(Debug, Default)]
pub struct Average {
    sum: Sum,
    count: usize,
}

impl Reducer for Average {
    fn consume(&mut self, value: Value) -> Result<()> {
        self.sum.consume(value)?;
        self.count += 1;
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        let total = self.sum.result()?.as_f64()?;
        Some(Value::from(total / self.count as f64))
    }

    fn reset(&mut self) {
        self.sum.reset();
        self.count = 0;
    }
}

#[derive(Debug, Default)]
pub struct CountValues {
    count: usize,
}

impl Reducer for CountValues {
    fn consume(&mut self, _value: Value) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        Some(Value::from(self.count))
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// `(accumulator, value) -> accumulator`, seeded with an initial value or with the first value consumed.
pub struct Generic<F> {
    reduce: F,
    initial: Option<Value>,
    accumulator: Option<Value>,
}

impl<F> Reducer for Generic<F>
where
    F: FnMut(Value, Value) -> Value + Send,
{
    fn consume(&mut self, value: Value) -> Result<()> {
        self.accumulator = Some(match self.accumulator.take() {
            Some(acc) => (self.reduce)(acc, value),
            None => value,
        });
        Ok(())
    }

    fn result(&self) -> Option<Value> {
        self.accumulator.clone()
    }

    fn reset(&mut self) {
        self.accumulator = self.initial.clone();
    }
}

#[must_use]
pub fn sum() -> Sum {
    Sum::default()
}

#[must_use]
pub const fn min() -> Extreme {
    Extreme {
        keep: Ordering::Less,
        current: None,
    }
}

#[must_use]
pub const fn max() -> Extreme {
    Extreme {
        keep: Ordering::Greater,
        current: None,
    }
}

#[must_use]
pub fn concat(separator: &str) -> Concat {
    Concat {
        separator: separator.to_string(),
        parts: Vec::new(),
    }
}

#[must_use]
pub fn average() -> Average {
    Average::default()
}

#[must_use]
pub fn count_values() -> CountValues {
    CountValues::default()
}

pub fn generic<F>(reduce: F) -> Generic<F>
where
    F: FnMut(Value, Value) -> Value + Send,
{
    Generic {
        reduce,
        initial: None,
        accumulator: None,
    }
}

/// Like [`generic`] but starting from `initial`; the result is `initial` when nothing is consumed.
pub fn fold<F>(initial: Value, reduce: F) -> Generic<F>
where
    F: FnMut(Value, Value) -> Value + Send,
{
    Generic {
        reduce,
        initial: Some(initial.clone()),
        accumulator: Some(initial),
    }
}
