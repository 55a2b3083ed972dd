// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::consumers::Consumer;
use crate::item::Item;
use crate::key::Key;
use parking_lot::Mutex;
use serde_json::Value;
use sluice_error::Result;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Queue {
    items: VecDeque<Item>,
    next_key: usize,
}

impl Queue {
    fn auto_keyed(&mut self, value: Value) -> Item {
        let item = Item::new(self.next_key, value);
        self.next_key += 1;
        item
    }
}

/// A FIFO that can grow while it is drained.
///
/// Clones share the queue, so a pipeline reading from it can append new work
/// through another clone, for example to generate a sequence as it goes.
/// Values appended without a key get sequential integer keys.
#[derive(Debug, Clone, Default)]
pub struct QueueProducer {
    queue: Arc<Mutex<Queue>>,
}

impl QueueProducer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, value: impl Into<Value>) {
        let mut queue = self.queue.lock();
        let item = queue.auto_keyed(value.into());
        queue.items.push_back(item);
    }

    pub fn append_item(&self, item: Item) {
        self.queue.lock().items.push_back(item);
    }

    pub fn prepend(&self, value: impl Into<Value>) {
        let mut queue = self.queue.lock();
        let item = queue.auto_keyed(value.into());
        queue.items.push_front(item);
    }

    pub fn prepend_item(&self, item: Item) {
        self.queue.lock().items.push_front(item);
    }
}

impl Producer for QueueProducer {
    fn next_item(&mut self) -> Result<Option<Item>> {
        Ok(self.queue.lock().items.pop_front())
    }

    fn count(&self) -> Option<usize> {
        Some(self.queue.lock().items.len())
    }

    fn last(&self) -> Option<Item> {
        self.queue.lock().items.back().cloned()
    }

    fn destroy(&mut self) {
        self.queue.lock().items.clear();
    }
}

impl Consumer for QueueProducer {
    fn consume(&mut self, value: &Value, key: &Key) -> Result<()> {
        self.append_item(Item {
            key: key.clone(),
            value: value.clone(),
        });
        Ok(())
    }
}
