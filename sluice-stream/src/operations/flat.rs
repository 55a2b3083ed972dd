// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `flat` and `chunk`: splitting collections and batching items.

use crate::operation::{Downstream, Operation};
use crate::result::Assoc;
use crate::signal::Signal;
use crate::stream::Stream;
use serde_json::Value;
use sluice_core::Item;
use sluice_error::{Result, SluiceError};
use std::mem;

pub(crate) struct Flat {
    depth: usize,
}

impl Flat {
    fn emit(
        depth: usize,
        item: Item,
        signal: &mut Signal,
        next: &mut Downstream<'_>,
    ) -> Result<()> {
        let children: Vec<Item> = match item.value {
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(index, value)| Item::new(index, value))
                .collect(),
            Value::Object(fields) => fields
                .into_iter()
                .map(|(name, value)| Item::new(name, value))
                .collect(),
            value => {
                signal.set_item(Item::new(item.key, value));
                return next.handle(signal);
            }
        };

        for child in children {
            if signal.is_stopped() {
                break;
            }
            if depth > 1 && is_collection(&child.value) {
                Self::emit(depth - 1, child, signal, next)?;
            } else {
                signal.set_item(child);
                next.handle(signal)?;
            }
        }
        Ok(())
    }
}

impl Operation for Flat {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        Self::emit(self.depth, item, signal, next)
    }
}

const fn is_collection(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

pub(crate) struct Chunk {
    size: usize,
    preserve_keys: bool,
    buffer: Vec<Item>,
    emitted: usize,
}

impl Chunk {
    fn flush(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let items = mem::take(&mut self.buffer);
        let value = if self.preserve_keys {
            let fields = Assoc::from_items(items);
            serde_json::to_value(&fields)
                .map_err(|e| SluiceError::stream_error(format!("chunk: {e}")))?
        } else {
            Value::Array(items.into_iter().map(|item| item.value).collect())
        };

        signal.set_item(Item::new(self.emitted, value));
        self.emitted += 1;
        next.handle(signal)
    }
}

impl Operation for Chunk {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        self.buffer.push(signal.take_item());
        if self.buffer.len() == self.size {
            self.flush(signal, next)?;
        }
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if !self.buffer.is_empty() {
            self.flush(signal, next)?;
        }
        next.finish(signal)
    }

    fn destroy(&mut self) {
        self.buffer.clear();
    }
}

impl Stream {
    /// Replace collection values by their elements, down to `depth` levels.
    ///
    /// Array elements are keyed by position and object fields by name.
    /// Scalars pass through unchanged.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `depth` is 0.
    pub fn flat(self, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(SluiceError::invalid_argument("flat: depth must be at least 1"));
        }
        self.append(Flat { depth })
    }

    /// Batch items into arrays of `size` values, keyed `0, 1, ...`.
    ///
    /// With `preserve_keys` each batch is an object keyed by the item keys.
    /// The last batch may be shorter.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `size` is 0.
    pub fn chunk(self, size: usize, preserve_keys: bool) -> Result<Self> {
        if size == 0 {
            return Err(SluiceError::invalid_argument("chunk: size must be at least 1"));
        }
        self.append(Chunk {
            size,
            preserve_keys,
            buffer: Vec::with_capacity(size),
            emitted: 0,
        })
    }
}
