// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use sluice_error::Result;

/// Drains each producer completely before moving to the next one.
#[derive(Default)]
pub struct MultiProducer {
    producers: Vec<Box<dyn Producer>>,
    current: usize,
}

impl MultiProducer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, producer: Box<dyn Producer>) {
        self.producers.push(producer);
    }

    fn pending(&self) -> &[Box<dyn Producer>] {
        self.producers.get(self.current..).unwrap_or_default()
    }
}

impl Producer for MultiProducer {
    fn next_item(&mut self) -> Result<Option<Item>> {
        while let Some(producer) = self.producers.get_mut(self.current) {
            if let Some(item) = producer.next_item()? {
                return Ok(Some(item));
            }
            producer.destroy();
            self.current += 1;
        }
        Ok(None)
    }

    fn count(&self) -> Option<usize> {
        self.pending().iter().map(|p| p.count()).sum()
    }

    fn is_empty(&self) -> bool {
        self.pending().iter().all(|p| p.is_empty())
    }

    fn last(&self) -> Option<Item> {
        self.pending()
            .iter()
            .rev()
            .find(|p| !p.is_empty())
            .and_then(|p| p.last())
    }

    fn destroy(&mut self) {
        for producer in &mut self.producers {
            producer.destroy();
        }
        self.current = self.producers.len();
    }
}
