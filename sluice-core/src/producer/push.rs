// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{MultiProducer, Producer};
use crate::item::Item;
use parking_lot::Mutex;
use sluice_error::Result;
use std::collections::VecDeque;
use std::sync::Arc;

/// Cloneable handle for pushing items into a [`PushProducer`].
#[derive(Debug, Clone, Default)]
pub struct PushHandle {
    queue: Arc<Mutex<VecDeque<Item>>>,
}

impl PushHandle {
    pub fn push(&self, item: Item) {
        self.queue.lock().push_back(item);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    fn pop(&self) -> Option<Item> {
        self.queue.lock().pop_front()
    }
}

/// Drains its wrapped sources, then whatever was pushed through its handle.
///
/// Items may be pushed while the producer is being drained, including from
/// the pipeline the producer feeds, which is how feedback loops are built.
#[derive(Default)]
pub struct PushProducer {
    sources: MultiProducer,
    pushed: PushHandle,
}

impl PushProducer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, producer: Box<dyn Producer>) {
        self.sources.push(producer);
    }

    #[must_use]
    pub fn handle(&self) -> PushHandle {
        self.pushed.clone()
    }
}

impl Producer for PushProducer {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if let Some(item) = self.sources.next_item()? {
            return Ok(Some(item));
        }
        Ok(self.pushed.pop())
    }

    fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.pushed.is_empty()
    }

    fn last(&self) -> Option<Item> {
        self.pushed
            .queue
            .lock()
            .back()
            .cloned()
            .or_else(|| self.sources.last())
    }

    fn destroy(&mut self) {
        self.sources.destroy();
        self.pushed.queue.lock().clear();
    }
}
