// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producers that fail or report on demand.

use sluice_core::{Item, Producer};
use sluice_error::{Result, SluiceError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a producer and fails instead of yielding the item at `fail_at`.
///
/// ```rust
/// use sluice_core::producer::{self, Producer};
/// use sluice_test_utils::ErrorInjectingProducer;
///
/// let mut source = ErrorInjectingProducer::new(producer::from_values([1, 2, 3]), 1);
///
/// assert!(source.next_item().is_ok());
/// assert!(source.next_item().is_err());
/// ```
pub struct ErrorInjectingProducer<P> {
    inner: P,
    fail_at: usize,
    position: usize,
}

impl<P: Producer> ErrorInjectingProducer<P> {
    pub const fn new(inner: P, fail_at: usize) -> Self {
        Self {
            inner,
            fail_at,
            position: 0,
        }
    }
}

impl<P: Producer> Producer for ErrorInjectingProducer<P> {
    fn next_item(&mut self) -> Result<Option<Item>> {
        let position = self.position;
        self.position += 1;
        if position == self.fail_at {
            return Err(SluiceError::stream_error(format!(
                "injected failure at item {position}"
            )));
        }
        self.inner.next_item()
    }

    fn destroy(&mut self) {
        self.inner.destroy();
    }
}

/// Shared counters observed by a [`TrackedProducer`].
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pulled: Arc<AtomicUsize>,
    destroyed: Arc<AtomicBool>,
}

impl Tracker {
    /// Items handed out so far.
    #[must_use]
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

/// Wraps a producer and records how far it was read and whether it was released.
pub struct TrackedProducer<P> {
    inner: P,
    tracker: Tracker,
}

impl<P: Producer> TrackedProducer<P> {
    pub fn new(inner: P) -> (Self, Tracker) {
        let tracker = Tracker::default();
        (
            Self {
                inner,
                tracker: tracker.clone(),
            },
            tracker,
        )
    }
}

impl<P: Producer> Producer for TrackedProducer<P> {
    fn next_item(&mut self) -> Result<Option<Item>> {
        let item = self.inner.next_item()?;
        if item.is_some() {
            self.tracker.pulled.fetch_add(1, Ordering::SeqCst);
        }
        Ok(item)
    }

    fn count(&self) -> Option<usize> {
        self.inner.count()
    }

    fn destroy(&mut self) {
        self.tracker.destroyed.store(true, Ordering::SeqCst);
        self.inner.destroy();
    }
}
