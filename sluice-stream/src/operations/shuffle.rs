// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Random permutation of the whole stream or of consecutive chunks.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use fastrand::Rng;
use sluice_core::producer::VecProducer;
use sluice_core::Item;
use sluice_error::{Result, SluiceError};
use std::mem;

pub(crate) struct Shuffle {
    chunk: Option<usize>,
    rng: Rng,
    buffer: Vec<Item>,
}

impl Shuffle {
    fn new(chunk: Option<usize>, rng: Rng) -> Self {
        Self {
            chunk,
            rng,
            buffer: Vec::with_capacity(chunk.unwrap_or_default()),
        }
    }

    fn forward_chunk(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let mut items = mem::take(&mut self.buffer);
        self.rng.shuffle(&mut items);
        for item in items {
            if signal.is_stopped() {
                break;
            }
            signal.set_item(item);
            next.handle(signal)?;
        }
        Ok(())
    }
}

impl Operation for Shuffle {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        self.buffer.push(signal.take_item());
        match self.chunk {
            Some(size) if self.buffer.len() == size => self.forward_chunk(signal, next),
            _ => Ok(()),
        }
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.buffer.is_empty() {
            return next.finish(signal);
        }
        let mut items = mem::take(&mut self.buffer);
        self.rng.shuffle(&mut items);
        signal.restart_from(next.position(), VecProducer::new(items));
        Ok(())
    }

    fn destroy(&mut self) {
        self.buffer.clear();
    }
}

fn check_chunk(chunk: Option<usize>) -> Result<()> {
    if chunk == Some(0) {
        return Err(SluiceError::invalid_argument(
            "shuffle: chunk size must be at least 1",
        ));
    }
    Ok(())
}

impl Stream {
    /// Emit all items in random order once the input is exhausted.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn shuffle(self) -> Result<Self> {
        self.append(Shuffle::new(None, Rng::new()))
    }

    /// Shuffle consecutive windows of `size` items independently.
    ///
    /// Each full window is emitted as soon as it is complete; the last,
    /// shorter window is emitted at the end of the stream.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `size` is 0.
    pub fn shuffle_chunks(self, size: usize) -> Result<Self> {
        check_chunk(Some(size))?;
        self.append(Shuffle::new(Some(size), Rng::new()))
    }

    /// Like [`shuffle`](Stream::shuffle) or, with `chunk`, like
    /// [`shuffle_chunks`](Stream::shuffle_chunks), with a reproducible order.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `chunk` is `Some(0)`.
    pub fn shuffle_seeded(self, chunk: Option<usize>, seed: u64) -> Result<Self> {
        check_chunk(chunk)?;
        self.append(Shuffle::new(chunk, Rng::with_seed(seed)))
    }
}
