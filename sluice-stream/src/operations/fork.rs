// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Split a stream into labelled sub-pipelines and merge their results.
//!
//! Each label gets its own pipeline, built on first sight by the prototype
//! factory. Items are pushed into their pipeline as they arrive. At the end
//! of the stream every pipeline is finished and contributes one item, keyed
//! by its label, in the order the labels were first seen.

use crate::destination::Destination;
use crate::operation::{Downstream, Operation};
use crate::result::LastOperation;
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::producer::VecProducer;
use sluice_core::{Discriminator, Item, Key};
use sluice_error::{Result, SluiceError};
use std::collections::HashMap;
use std::mem;

type Prototype = Box<dyn FnMut() -> Result<LastOperation> + Send>;

pub(crate) struct Fork<D> {
    discriminator: D,
    prototype: Prototype,
    /// Built while configuring, to check for loops; serves the first label.
    spare: Option<LastOperation>,
    branches: Vec<(Key, LastOperation)>,
    index: HashMap<Key, usize>,
}

impl<D: Discriminator> Fork<D> {
    fn branch(&mut self, label: Key) -> Result<&mut LastOperation> {
        let position = match self.index.get(&label) {
            Some(&position) => position,
            None => {
                let branch = match self.spare.take() {
                    Some(spare) => spare,
                    None => (self.prototype)()?,
                };
                debug!("fork: opening branch {label}");
                self.index.insert(label.clone(), self.branches.len());
                self.branches.push((label, branch));
                self.branches.len() - 1
            }
        };
        Ok(&mut self.branches[position].1)
    }
}

impl<D: Discriminator> Operation for Fork<D> {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        let label = self.discriminator.classify(&item.value, &item.key)?;
        let label = Key::from_label(label, "fork")?;
        self.branch(label)?.accept(item)
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let stopped = signal.is_stopped();
        let mut merged = Vec::with_capacity(self.branches.len());
        for (label, mut branch) in mem::take(&mut self.branches) {
            if stopped {
                branch.cancel()?;
            } else {
                branch.finish()?;
            }
            merged.push(Item::new(label, branch.get()?));
        }
        self.index.clear();

        if merged.is_empty() {
            return next.finish(signal);
        }
        signal.restart_from(next.position(), VecProducer::new(merged));
        Ok(())
    }

    fn destroy(&mut self) {
        self.index.clear();
        let branches = mem::take(&mut self.branches).into_iter().map(|(_, b)| b);
        for branch in self.spare.take().into_iter().chain(branches) {
            if let Err(e) = branch.destroy() {
                warn!("fork: releasing a branch failed: {e}");
            }
        }
    }
}

impl Stream {
    /// Route every item into the pipeline of its label, then emit one
    /// result per label.
    ///
    /// `prototype` builds a fresh pipeline, ending in a terminal operation,
    /// whenever a new label shows up:
    ///
    /// ```
    /// use sluice_core::discriminators;
    /// use sluice_stream::Stream;
    ///
    /// let sums = Stream::of([1, 2, 3, 4, 5])
    ///     .fork(discriminators::even_odd(), || {
    ///         Stream::empty().reduce(sluice_core::reducers::sum())
    ///     })?
    ///     .to_json_assoc()?;
    ///
    /// assert_eq!(sums, r#"{"odd":9,"even":6}"#);
    /// # Ok::<(), sluice_stream::SluiceError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`SluiceError::LoopDetected`] when the prototype's pipeline
    /// is this stream, or the prototype's own error.
    pub fn fork<D, P>(self, discriminator: D, mut prototype: P) -> Result<Self>
    where
        D: Discriminator + 'static,
        P: FnMut() -> Result<LastOperation> + Send + 'static,
    {
        let probe = prototype()?;
        if probe.routes_to(&self) {
            return Err(SluiceError::loop_detected(
                "fork: the prototype pipeline is the forking stream",
            ));
        }
        self.append(Fork {
            discriminator,
            prototype: Box::new(prototype),
            spare: Some(probe),
            branches: Vec::new(),
            index: HashMap::new(),
        })
    }
}
