// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-item rewriting of values and keys.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::{Discriminator, Key, Mapper};
use sluice_error::{Result, SluiceError};
use std::mem;

pub(crate) struct Map<M> {
    mapper: M,
}

impl<M: Mapper> Operation for Map<M> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item_mut();
        let value = mem::take(&mut item.value);
        item.value = self.mapper.map(value, &item.key)?;
        next.handle(signal)
    }
}

/// The mapper receives the key as its value; its result becomes the new key.
pub(crate) struct MapKey<M> {
    mapper: M,
}

impl<M: Mapper> Operation for MapKey<M> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item_mut();
        let label = self.mapper.map(item.key.to_value(), &item.key)?;
        item.key = Key::from_label(label, "map_key")?;
        next.handle(signal)
    }
}

pub(crate) struct Classify<D> {
    discriminator: D,
}

impl<D: Discriminator> Operation for Classify<D> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item_mut();
        let label = self.discriminator.classify(&item.value, &item.key)?;
        item.key = Key::from_label(label, "classify")?;
        next.handle(signal)
    }
}

pub(crate) struct Flip;

impl Operation for Flip {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item_mut();
        let key = Key::from_label(mem::take(&mut item.value), "flip")?;
        item.value = mem::replace(&mut item.key, key).into();
        next.handle(signal)
    }
}

pub(crate) struct Reindex {
    next_key: Option<i64>,
    step: i64,
}

impl Operation for Reindex {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let key = self
            .next_key
            .ok_or_else(|| SluiceError::stream_error("reindex: key overflow"))?;
        self.next_key = key.checked_add(self.step);
        signal.item_mut().key = Key::Int(key);
        next.handle(signal)
    }
}

impl Stream {
    /// Replace each value with the mapper's result.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn map<M: Mapper + 'static>(self, mapper: M) -> Result<Self> {
        self.append(Map { mapper })
    }

    /// Replace each key with the mapper's result, computed from the key.
    ///
    /// A result that is not a string, an integer or a boolean is a contract violation.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn map_key<M: Mapper + 'static>(self, mapper: M) -> Result<Self> {
        self.append(MapKey { mapper })
    }

    /// Replace each key with the label the discriminator assigns to the item.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn classify<D: Discriminator + 'static>(self, discriminator: D) -> Result<Self> {
        self.append(Classify { discriminator })
    }

    /// Swap keys and values. A value that cannot be a key is a contract violation.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn flip(self) -> Result<Self> {
        self.append(Flip)
    }

    /// Number items `start, start + step, ...`.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `step` is 0.
    pub fn reindex(self, start: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(SluiceError::invalid_argument("reindex: step cannot be 0"));
        }
        self.append(Reindex {
            next_key: Some(start),
            step,
        })
    }
}
