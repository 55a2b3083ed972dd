// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use sluice_error::Result;
use std::mem;

/// Replays a ring buffer once, starting at `start` and wrapping around.
#[derive(Debug, Default)]
pub struct CircularBufferProducer {
    buffer: Vec<Item>,
    start: usize,
    served: usize,
}

impl CircularBufferProducer {
    /// `start` is the index of the oldest entry; it is taken modulo the buffer length.
    #[must_use]
    pub fn new(buffer: Vec<Item>, start: usize) -> Self {
        let start = if buffer.is_empty() {
            0
        } else {
            start % buffer.len()
        };
        Self {
            buffer,
            start,
            served: 0,
        }
    }

    fn slot(&self, offset: usize) -> usize {
        (self.start + offset) % self.buffer.len()
    }
}

impl Producer for CircularBufferProducer {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if self.served >= self.buffer.len() {
            return Ok(None);
        }
        let slot = self.slot(self.served);
        self.served += 1;
        Ok(Some(mem::take(&mut self.buffer[slot])))
    }

    fn count(&self) -> Option<usize> {
        Some(self.buffer.len() - self.served)
    }

    /// The newest entry: the one just before `start`.
    fn last(&self) -> Option<Item> {
        if self.served >= self.buffer.len() {
            return None;
        }
        self.buffer
            .get(self.slot(self.buffer.len() - 1))
            .cloned()
    }

    fn destroy(&mut self) {
        self.buffer.clear();
        self.served = 0;
    }
}
