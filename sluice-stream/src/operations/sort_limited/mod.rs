// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sorting, optionally bounded to the best `n` items.
//!
//! Every sort buffers its input and replays the ordered items at the end
//! of the stream. A bounded sort keeps at most `n` items in memory at any
//! time, which makes `best(n)` / `worst(n)` usable on unbounded input
//! followed by an early stop.
//!
//! An unbounded sort directly followed by `limit(n)` is turned into a
//! bounded one: the limit is pushed into the sort instead of being added
//! as a stage of its own.
//!
//! The order is stable: items that compare equal keep their input order,
//! and when the bound is reached an equal newcomer never displaces an item
//! already retained.

mod bounded_heap;

use self::bounded_heap::BoundedHeap;
use crate::operation::{Downstream, Limitable, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::producer::VecProducer;
use sluice_core::{Check, Comparator, ItemComparator};
use sluice_error::{Result, SluiceError};

pub(crate) struct SortLimited {
    heap: BoundedHeap,
}

impl SortLimited {
    pub(crate) fn new(comparator: ItemComparator, reversed: bool, limit: Option<usize>) -> Self {
        Self {
            heap: BoundedHeap::new(comparator, reversed, limit),
        }
    }
}

impl Operation for SortLimited {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        self.heap.push(signal.take_item());
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let items = self.heap.drain_sorted();
        if items.is_empty() {
            return next.finish(signal);
        }
        debug!("sort: replaying {} items", items.len());
        signal.restart_from(next.position(), VecProducer::new(items));
        Ok(())
    }

    fn as_limitable(&mut self) -> Option<&mut dyn Limitable> {
        Some(self)
    }

    fn destroy(&mut self) {
        self.heap.clear();
    }
}

impl Limitable for SortLimited {
    fn apply_limit(&mut self, limit: usize) {
        self.heap.apply_limit(limit);
    }

    fn limit(&self) -> usize {
        self.heap.limit().unwrap_or(usize::MAX)
    }
}

impl Stream {
    /// Sort by value, ascending.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn sort(self) -> Result<Self> {
        self.append(SortLimited::new(ItemComparator::natural(), false, None))
    }

    /// Sort by value, descending.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn rsort(self) -> Result<Self> {
        self.append(SortLimited::new(ItemComparator::natural(), true, None))
    }

    /// Sort with `comparator` applied to the part of the item selected by `mode`.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `mode` cannot order
    /// items with this comparator.
    pub fn sort_by(self, comparator: Comparator, mode: Check) -> Result<Self> {
        let comparator = ItemComparator::new(comparator, mode)?;
        self.append(SortLimited::new(comparator, false, None))
    }

    /// The `n` smallest values, ascending.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `n` is 0.
    pub fn best(self, n: usize) -> Result<Self> {
        self.sort_limited(n, Comparator::Natural, Check::Value, false)
    }

    /// The `n` largest values, descending.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `n` is 0.
    pub fn worst(self, n: usize) -> Result<Self> {
        self.sort_limited(n, Comparator::Natural, Check::Value, true)
    }

    /// The first `n` items of the sorted order, without holding more than `n`.
    ///
    /// `reversed` flips the comparator, selecting the last `n` in reverse.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] when `n` is 0 or when
    /// `mode` cannot order items with this comparator.
    pub fn sort_limited(
        self,
        n: usize,
        comparator: Comparator,
        mode: Check,
        reversed: bool,
    ) -> Result<Self> {
        if n == 0 {
            return Err(SluiceError::invalid_argument(
                "sort_limited: limit must be at least 1",
            ));
        }
        let comparator = ItemComparator::new(comparator, mode)?;
        self.append(SortLimited::new(comparator, reversed, Some(n)))
    }
}
