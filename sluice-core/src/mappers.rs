// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mapper contract.
//!
//! Any `FnMut(Value) -> Value` closure is a [`Mapper`]. Use [`by_item`] when
//! the new value depends on the key and [`fallible`] when mapping can fail.

use crate::key::Key;
use serde_json::Value;
use sluice_error::Result;

/// Produces a new value for an item.
pub trait Mapper: Send {
    /// # Errors
    /// Returns a data error when user code fails while mapping.
    fn map(&mut self, value: Value, key: &Key) -> Result<Value>;
}

impl<F> Mapper for F
where
    F: FnMut(Value) -> Value + Send,
{
    fn map(&mut self, value: Value, _key: &Key) -> Result<Value> {
        Ok(self(value))
    }
}

pub struct ItemMapper<F>(F);

impl<F> Mapper for ItemMapper<F>
where
    F: FnMut(Value, &Key) -> Value + Send,
{
    fn map(&mut self, value: Value, key: &Key) -> Result<Value> {
        Ok((self.0)(value, key))
    }
}

pub struct FallibleMapper<F>(F);

impl<F> Mapper for FallibleMapper<F>
where
    F: FnMut(Value, &Key) -> Result<Value> + Send,
{
    fn map(&mut self, value: Value, key: &Key) -> Result<Value> {
        (self.0)(value, key)
    }
}

/// A mapper over `(value, key)` pairs.
pub fn by_item<F>(mapper: F) -> ItemMapper<F>
where
    F: FnMut(Value, &Key) -> Value + Send,
{
    ItemMapper(mapper)
}

/// A mapper that may fail with a data error.
pub fn fallible<F>(mapper: F) -> FallibleMapper<F>
where
    F: FnMut(Value, &Key) -> Result<Value> + Send,
{
    FallibleMapper(mapper)
}
