// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Targets that routing stages push items into.

use crate::result::LastOperation;
use crate::stream::Stream;
use sluice_core::{Collector, Item};
use sluice_error::Result;

/// A push-mode receiver of items routed by `dispatch` or `fork`.
pub trait Destination: Send {
    /// # Errors
    /// Returns [`SluiceError::LoopDetected`](sluice_error::SluiceError::LoopDetected)
    /// when the destination is already executing, or the error its own
    /// pipeline raised for the item.
    fn accept(&mut self, item: Item) -> Result<()>;

    /// The routing stream has ended; flush and complete.
    ///
    /// # Errors
    /// Returns the error that aborted the destination's run.
    fn finish(&mut self) -> Result<()>;

    /// The routing stream was stopped; drop pending sources, then flush.
    ///
    /// # Errors
    /// Returns the error that aborted the destination's run.
    fn cancel(&mut self) -> Result<()> {
        self.finish()
    }

    /// `true` when items accepted here would flow into `stream`.
    fn routes_to(&self, _stream: &Stream) -> bool {
        false
    }
}

impl Destination for Stream {
    fn accept(&mut self, item: Item) -> Result<()> {
        self.lock_for_delivery()?.accept(item)
    }

    fn finish(&mut self) -> Result<()> {
        self.lock_for_delivery()?.run_to_end()
    }

    fn cancel(&mut self) -> Result<()> {
        self.lock_for_delivery()?.cancel()
    }

    fn routes_to(&self, stream: &Stream) -> bool {
        self.same_as(stream)
    }
}

impl Destination for LastOperation {
    fn accept(&mut self, item: Item) -> Result<()> {
        self.source().lock_for_delivery()?.accept(item)
    }

    fn finish(&mut self) -> Result<()> {
        self.result().map(|_| ())
    }

    fn cancel(&mut self) -> Result<()> {
        self.source().lock_for_delivery()?.cancel()
    }

    fn routes_to(&self, stream: &Stream) -> bool {
        self.source().same_as(stream)
    }
}

impl Destination for Collector {
    fn accept(&mut self, item: Item) -> Result<()> {
        self.push(item);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
