// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side effects that leave the items untouched.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::{Collector, Consumer, Item};
use sluice_error::{Result, SluiceError};

pub(crate) struct Call<C> {
    consumer: C,
    remaining: Option<usize>,
}

impl<C: Consumer> Operation for Call<C> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        match &mut self.remaining {
            Some(0) => {}
            remaining => {
                let item = signal.item();
                self.consumer.consume(&item.value, &item.key)?;
                if let Some(left) = remaining {
                    *left -= 1;
                }
            }
        }
        next.handle(signal)
    }
}

pub(crate) struct CollectIn {
    collector: Collector,
    preserve_keys: bool,
    index: usize,
}

impl Operation for CollectIn {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item();
        let collected = if self.preserve_keys {
            item.clone()
        } else {
            Item::new(self.index, item.value.clone())
        };
        self.index += 1;
        self.collector.push(collected);
        next.handle(signal)
    }
}

impl Stream {
    /// Run `consumer` on every item, then forward it.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn call<C: Consumer + 'static>(self, consumer: C) -> Result<Self> {
        self.append(Call {
            consumer,
            remaining: None,
        })
    }

    /// Run `consumer` on the first `times` items only; every item is forwarded.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `times` is 0.
    pub fn send_to_max<C: Consumer + 'static>(self, times: usize, consumer: C) -> Result<Self> {
        if times == 0 {
            return Err(SluiceError::invalid_argument(
                "send_to_max: times must be at least 1",
            ));
        }
        self.append(Call {
            consumer,
            remaining: Some(times),
        })
    }

    /// Copy every item into `collector`, renumbered from 0 unless `preserve_keys`.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn collect_in(self, collector: Collector, preserve_keys: bool) -> Result<Self> {
        self.append(CollectIn {
            collector,
            preserve_keys,
            index: 0,
        })
    }
}
