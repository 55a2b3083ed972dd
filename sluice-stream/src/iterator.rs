// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Step-wise consumption of a stream.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use parking_lot::Mutex;
use sluice_core::Item;
use sluice_error::Result;
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::sync::Arc;

type Outbox = Arc<Mutex<VecDeque<Item>>>;

/// Terminal stage that hands each item to the iterator and pauses the run.
struct Iterate {
    outbox: Outbox,
}

impl Operation for Iterate {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        self.outbox.lock().push_back(signal.take_item());
        signal.interrupt();
        Ok(())
    }
}

/// Pulls one item through the pipeline per call to `next`.
///
/// Buffering stages still buffer: the first item after a `sort` only
/// arrives once the whole source has been read.
pub struct StreamIterator {
    stream: Stream,
    outbox: Outbox,
    done: bool,
}

impl StreamIterator {
    pub(crate) fn attach(stream: Stream) -> Result<Self> {
        let outbox = Outbox::default();
        let stream = stream.append_terminal(Iterate {
            outbox: outbox.clone(),
        })?;
        stream.lock("iterate")?.claim()?;
        Ok(Self {
            stream,
            outbox,
            done: false,
        })
    }
}

impl Iterator for StreamIterator {
    type Item = Result<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ready = self.outbox.lock().pop_front();
            if let Some(item) = ready {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            match self.stream.step() {
                Ok(finished) => self.done = finished,
                Err(error) => {
                    self.done = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl Debug for StreamIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamIterator")
            .field("stream", &self.stream)
            .field("pending", &self.outbox.lock().len())
            .field("done", &self.done)
            .finish()
    }
}
