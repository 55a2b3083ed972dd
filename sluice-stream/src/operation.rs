// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The stage contract and the view a stage has of its successors.

use crate::signal::Signal;
use sluice_error::Result;

/// One stage of a pipeline.
///
/// A stage receives the current item through the [`Signal`] and either
/// forwards it with `next.handle(signal)` or swallows it. At the end of each
/// pass [`streaming_finished`](Operation::streaming_finished) runs once; the
/// default implementation simply propagates it.
pub trait Operation: Send {
    /// # Errors
    /// Data errors raised by user strategies are offered to the stream's
    /// error handler; every other error aborts the run.
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()>;

    /// # Errors
    /// Any error raised while flushing aborts the run.
    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        next.finish(signal)
    }

    /// Stages whose output is bounded expose their bound for limit pushdown.
    fn as_limitable(&mut self) -> Option<&mut dyn Limitable> {
        None
    }

    /// Release buffers and resources. Called once, in reverse stage order.
    fn destroy(&mut self) {}
}

/// A stage that emits at most [`limit`](Limitable::limit) items.
pub trait Limitable {
    /// Lower the bound to `min(current, limit)`, trimming any buffered excess.
    fn apply_limit(&mut self, limit: usize);

    fn limit(&self) -> usize;
}

/// The stages after the current one.
pub struct Downstream<'a> {
    stages: &'a mut [Box<dyn Operation>],
    position: usize,
}

impl<'a> Downstream<'a> {
    pub(crate) fn new(stages: &'a mut [Box<dyn Operation>], position: usize) -> Self {
        Self { stages, position }
    }

    /// Deliver the current item to the next stage. A no-op past the last stage.
    ///
    /// # Errors
    /// Propagates the error of any downstream stage.
    pub fn handle(&mut self, signal: &mut Signal) -> Result<()> {
        let position = self.position;
        match self.stages.split_first_mut() {
            Some((stage, rest)) => stage.handle(signal, &mut Downstream::new(rest, position + 1)),
            None => Ok(()),
        }
    }

    /// Propagate the end of stream to the next stage.
    ///
    /// # Errors
    /// Propagates the error of any downstream stage.
    pub fn finish(&mut self, signal: &mut Signal) -> Result<()> {
        let position = self.position;
        match self.stages.split_first_mut() {
            Some((stage, rest)) => {
                stage.streaming_finished(signal, &mut Downstream::new(rest, position + 1))
            }
            None => Ok(()),
        }
    }

    /// Index of the next stage in the stream's chain.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Index of the stage holding this view.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.position.saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
