// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::producer::VecProducer;
use sluice_core::Item;
use sluice_error::Result;
use std::mem;

pub(crate) struct Reverse {
    buffer: Vec<Item>,
}

impl Operation for Reverse {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        self.buffer.push(signal.take_item());
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.buffer.is_empty() {
            return next.finish(signal);
        }
        let mut items = mem::take(&mut self.buffer);
        items.reverse();
        signal.restart_from(next.position(), VecProducer::new(items));
        Ok(())
    }

    fn destroy(&mut self) {
        self.buffer.clear();
    }
}

impl Stream {
    /// Emit the items in reverse order once the input is exhausted.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn reverse(self) -> Result<Self> {
        self.append(Reverse { buffer: Vec::new() })
    }
}
