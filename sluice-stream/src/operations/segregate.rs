// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::operation::{Downstream, Limitable, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use serde_json::Value;
use sluice_core::producer::VecProducer;
use sluice_core::{Check, Comparator, Item, ItemComparator};
use sluice_error::{Result, SluiceError};
use std::cmp::Ordering;
use std::mem;

/// Buckets of equal items, kept sorted by their first member.
pub(crate) struct Segregate {
    buckets: Vec<Vec<Item>>,
    limit: usize,
    comparator: ItemComparator,
}

impl Segregate {
    fn insert(&mut self, item: Item) {
        let position = self.buckets.binary_search_by(|bucket| {
            bucket
                .first()
                .map_or(Ordering::Less, |head| self.comparator.compare(head, &item))
        });

        match position {
            Ok(index) => self.buckets[index].push(item),
            Err(index) if index < self.limit => {
                self.buckets.insert(index, vec![item]);
                self.buckets.truncate(self.limit);
            }
            // Worse than every bucket and no room left.
            Err(_) => {}
        }
    }
}

impl Operation for Segregate {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        self.insert(signal.take_item());
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.buckets.is_empty() {
            return next.finish(signal);
        }
        let items = mem::take(&mut self.buckets)
            .into_iter()
            .enumerate()
            .map(|(index, bucket)| {
                let values = bucket.into_iter().map(|item| item.value).collect();
                Item::new(index, Value::Array(values))
            })
            .collect();
        signal.restart_from(next.position(), VecProducer::new(items));
        Ok(())
    }

    fn as_limitable(&mut self) -> Option<&mut dyn Limitable> {
        Some(self)
    }

    fn destroy(&mut self) {
        self.buckets.clear();
    }
}

impl Limitable for Segregate {
    fn apply_limit(&mut self, limit: usize) {
        self.limit = self.limit.min(limit);
        self.buckets.truncate(self.limit);
    }

    fn limit(&self) -> usize {
        self.limit
    }
}

impl Stream {
    /// Group equal values into at most `buckets` sorted buckets.
    ///
    /// At the end of the stream each bucket becomes one item keyed by its
    /// index, whose value is the array of the bucket's values. Values that
    /// would open a bucket past the last one are dropped.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `buckets` is 0.
    pub fn segregate(self, buckets: usize) -> Result<Self> {
        self.segregate_by(buckets, Comparator::Natural, Check::Value)
    }

    /// [`segregate`](Stream::segregate) under `comparator`.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `buckets` is 0 or when
    /// `mode` cannot order items with this comparator.
    pub fn segregate_by(self, buckets: usize, comparator: Comparator, mode: Check) -> Result<Self> {
        if buckets == 0 {
            return Err(SluiceError::invalid_argument(
                "segregate: bucket count must be at least 1",
            ));
        }
        self.append(Segregate {
            buckets: Vec::new(),
            limit: buckets,
            comparator: ItemComparator::new(comparator, mode)?,
        })
    }
}
