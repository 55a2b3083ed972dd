// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Discriminator contract and common discriminators.
//!
//! A discriminator classifies an item into a label. Labels are returned as
//! plain values; the engine converts them with [`Key::from_label`], so a
//! label that is not a string, an integer or a boolean is reported as a
//! contract violation.

use crate::check::Check;
use crate::filters::Filter;
use crate::key::Key;
use serde_json::Value;
use sluice_error::Result;

/// Maps an item to a classification label.
pub trait Discriminator: Send {
    /// # Errors
    /// Returns a data error when user code fails while classifying.
    fn classify(&mut self, value: &Value, key: &Key) -> Result<Value>;
}

impl<F> Discriminator for F
where
    F: FnMut(&Value) -> Value + Send,
{
    fn classify(&mut self, value: &Value, _key: &Key) -> Result<Value> {
        Ok(self(value))
    }
}

pub struct ItemDiscriminator<F>(F);

impl<F> Discriminator for ItemDiscriminator<F>
where
    F: FnMut(&Value, &Key) -> Result<Value> + Send,
{
    fn classify(&mut self, value: &Value, key: &Key) -> Result<Value> {
        (self.0)(value, key)
    }
}

/// A discriminator over `(value, key)` pairs that may fail.
pub fn by_item<F>(classify: F) -> ItemDiscriminator<F>
where
    F: FnMut(&Value, &Key) -> Result<Value> + Send,
{
    ItemDiscriminator(classify)
}

/// The item's key.
#[must_use]
pub fn by_key() -> impl Discriminator {
    by_item(|_: &Value, key: &Key| Ok(key.to_value()))
}

/// The item's value itself.
#[must_use]
pub fn by_value() -> impl Discriminator {
    |value: &Value| value.clone()
}

/// A field of an object value; `null` when missing.
#[must_use]
pub fn by_field(field: &str) -> impl Discriminator {
    let field = field.to_string();
    move |value: &Value| value.get(&field).cloned().unwrap_or(Value::Null)
}

/// `"even"` or `"odd"` for integers; `null` (a contract violation) otherwise.
#[must_use]
pub fn even_odd() -> impl Discriminator {
    |value: &Value| match value.as_i64() {
        Some(n) if n % 2 == 0 => Value::from("even"),
        Some(_) => Value::from("odd"),
        None => Value::Null,
    }
}

/// `yes` when `filter` accepts the value, `no` otherwise.
pub fn yes_no<F: Filter>(
    mut filter: F,
    yes: impl Into<Value>,
    no: impl Into<Value>,
) -> impl Discriminator {
    let yes = yes.into();
    let no = no.into();
    by_item(move |value: &Value, key: &Key| {
        Ok(if filter.is_allowed(value, key, Check::Value)? {
            yes.clone()
        } else {
            no.clone()
        })
    })
}
