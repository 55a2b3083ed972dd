// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::producer::CircularBufferProducer;
use sluice_core::Item;
use sluice_error::Result;
use std::mem;

/// Keeps the last `length` items in a ring; `write` is the next slot to overwrite.
pub(crate) struct Tail {
    length: usize,
    ring: Vec<Item>,
    write: usize,
}

impl Operation for Tail {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        if self.length == 0 {
            return Ok(());
        }
        if self.ring.len() < self.length {
            self.ring.push(item);
        } else {
            self.ring[self.write] = item;
        }
        self.write = (self.write + 1) % self.length;
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.ring.is_empty() {
            return next.finish(signal);
        }
        // A ring that never filled up starts at slot 0.
        let oldest = if self.ring.len() < self.length { 0 } else { self.write };
        let ring = mem::take(&mut self.ring);
        self.write = 0;
        signal.restart_from(next.position(), CircularBufferProducer::new(ring, oldest));
        Ok(())
    }

    fn destroy(&mut self) {
        self.ring.clear();
    }
}

impl Stream {
    /// Keep only the last `length` items, in their original order.
    ///
    /// `tail(0)` drops everything.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn tail(self, length: usize) -> Result<Self> {
        self.append(Tail {
            length,
            ring: Vec::with_capacity(length.min(1024)),
            write: 0,
        })
    }
}
