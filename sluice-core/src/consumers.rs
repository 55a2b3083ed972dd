// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consumer contract and the shared [`Collector`] bucket.

use crate::item::Item;
use crate::key::Key;
use parking_lot::Mutex;
use serde_json::Value;
use sluice_error::Result;
use std::sync::Arc;

/// Side-effecting sink for `(value, key)` pairs.
pub trait Consumer: Send {
    /// # Errors
    /// Returns a data error when user code fails while consuming.
    fn consume(&mut self, value: &Value, key: &Key) -> Result<()>;
}

impl<F> Consumer for F
where
    F: FnMut(&Value, &Key) + Send,
{
    fn consume(&mut self, value: &Value, key: &Key) -> Result<()> {
        self(value, key);
        Ok(())
    }
}

pub struct FallibleConsumer<F>(F);

impl<F> Consumer for FallibleConsumer<F>
where
    F: FnMut(&Value, &Key) -> Result<()> + Send,
{
    fn consume(&mut self, value: &Value, key: &Key) -> Result<()> {
        (self.0)(value, key)
    }
}

/// A consumer that may fail with a data error.
pub fn fallible<F>(consumer: F) -> FallibleConsumer<F>
where
    F: FnMut(&Value, &Key) -> Result<()> + Send,
{
    FallibleConsumer(consumer)
}

/// A cloneable, shared bucket of items.
///
/// Every clone refers to the same storage, so a collector handed to a
/// pipeline can be inspected by the caller after the run.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    items: Arc<Mutex<Vec<Item>>>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: Item) {
        self.items.lock().push(item);
    }

    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.items.lock().clone()
    }

    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.items.lock().iter().map(|i| i.value.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }
}

impl Consumer for Collector {
    fn consume(&mut self, value: &Value, key: &Key) -> Result<()> {
        self.push(Item {
            key: key.clone(),
            value: value.clone(),
        });
        Ok(())
    }
}
