// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use sluice_error::Result;

/// Position of a [`Resumable`] in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NotStarted,
    /// At least one item was yielded and the producer may have more.
    Positioned,
    Exhausted,
}

/// Explicit state machine around a producer.
///
/// `advance` is fused: once the producer reports exhaustion (or is
/// destroyed) it is released and never polled again.
pub struct Resumable {
    producer: Option<Box<dyn Producer>>,
    state: State,
}

impl Resumable {
    #[must_use]
    pub fn new(producer: Box<dyn Producer>) -> Self {
        Self {
            producer: Some(producer),
            state: State::NotStarted,
        }
    }

    /// Yield the next item.
    ///
    /// # Errors
    /// Propagates the producer's error; the state is left unchanged.
    pub fn advance(&mut self) -> Result<Option<Item>> {
        let Some(producer) = self.producer.as_mut() else {
            return Ok(None);
        };

        match producer.next_item()? {
            Some(item) => {
                self.state = State::Positioned;
                Ok(Some(item))
            }
            None => {
                self.destroy();
                Ok(None)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn count(&self) -> Option<usize> {
        self.producer.as_ref().map_or(Some(0), |p| p.count())
    }

    pub fn destroy(&mut self) {
        if let Some(mut producer) = self.producer.take() {
            producer.destroy();
        }
        self.state = State::Exhausted;
    }
}
