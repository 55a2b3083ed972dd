// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy, resumable item sources.
//!
//! A [`Producer`] yields one [`Item`] per call to
//! [`next_item`](Producer::next_item) until it is exhausted or destroyed.
//! Nothing is read ahead: each call resumes exactly where the previous one
//! stopped. Buffering operations replay their buffers through the same
//! contract, so a replay is just another producer.
//!
//! # Sources
//!
//! | constructor | yields |
//! |-------------|--------|
//! | [`from_values`], [`from_items`], [`from_pairs`] | a bounded sequence |
//! | [`from_iter`] | any iterator of items |
//! | [`from_fn`] | a resumable generator function |
//! | [`lines`] | lines of a [`BufRead`](std::io::BufRead) |
//! | [`cursor`] | rows fetched from a [`RowCursor`] |
//! | [`from_stream`] | values of a `futures::Stream`, drained blocking |
//! | [`sequential_int`], [`random_int`], [`random_string`], [`collatz`] | synthetic sequences |
//!
//! Composite producers: [`MultiProducer`] (sequential), [`PushProducer`]
//! (accepts pushed items after its sources) and [`QueueProducer`] (FIFO
//! that can grow while drained).
//!
//! ```
//! use sluice_core::producer::{self, Producer};
//!
//! let mut numbers = producer::sequential_int(1, 2, Some(3)).unwrap();
//! assert_eq!(numbers.count(), Some(3));
//! assert_eq!(numbers.next_item().unwrap().unwrap().value, 1);
//! assert_eq!(numbers.next_item().unwrap().unwrap().value, 3);
//! ```

mod circular;
mod cursor;
mod generators;
mod lines;
mod multi;
mod push;
mod queue;
mod resumable;
mod sequence;
mod stream_source;

pub use self::circular::CircularBufferProducer;
pub use self::cursor::{CursorProducer, RowCursor};
pub use self::generators::{collatz, random_int, random_string, sequential_int};
pub use self::generators::{Collatz, RandomInt, RandomString, SequentialInt};
pub use self::lines::LineReader;
pub use self::multi::MultiProducer;
pub use self::push::{PushHandle, PushProducer};
pub use self::queue::QueueProducer;
pub use self::resumable::{Resumable, State};
pub use self::sequence::{FnProducer, IterProducer, VecProducer};
pub use self::stream_source::StreamSource;

use crate::item::Item;
use crate::key::Key;
use serde_json::Value;
use sluice_error::Result;
use std::io::BufRead;

/// A lazy, resumable source of items.
pub trait Producer: Send {
    /// Advance and return the next item, or `None` once exhausted.
    ///
    /// # Errors
    /// Returns an error when the underlying resource fails.
    fn next_item(&mut self) -> Result<Option<Item>>;

    /// Exact number of remaining items, when known.
    fn count(&self) -> Option<usize> {
        None
    }

    /// `true` only when the producer is known to have nothing left.
    fn is_empty(&self) -> bool {
        self.count() == Some(0)
    }

    /// The last remaining item, without consuming anything, when it can be known.
    fn last(&self) -> Option<Item> {
        None
    }

    /// Release the underlying resource. Idempotent; afterwards the producer is exhausted.
    fn destroy(&mut self) {}
}

impl Producer for Box<dyn Producer> {
    fn next_item(&mut self) -> Result<Option<Item>> {
        (**self).next_item()
    }

    fn count(&self) -> Option<usize> {
        (**self).count()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn last(&self) -> Option<Item> {
        (**self).last()
    }

    fn destroy(&mut self) {
        (**self).destroy();
    }
}

/// Values keyed `0..n`.
pub fn from_values<I, V>(values: I) -> VecProducer
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    VecProducer::new(
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Item::new(index, value))
            .collect(),
    )
}

#[must_use]
pub fn from_items(items: Vec<Item>) -> VecProducer {
    VecProducer::new(items)
}

pub fn from_pairs<I, K, V>(pairs: I) -> VecProducer
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
    V: Into<Value>,
{
    VecProducer::new(pairs.into_iter().map(|(k, v)| Item::new(k, v)).collect())
}

pub fn from_iter<I>(items: I) -> IterProducer<I::IntoIter>
where
    I: IntoIterator<Item = Item>,
    I::IntoIter: Send,
{
    IterProducer::new(items.into_iter())
}

pub fn from_fn<F>(generate: F) -> FnProducer<F>
where
    F: FnMut() -> Result<Option<Item>> + Send,
{
    FnProducer::new(generate)
}

pub fn lines<R: BufRead + Send>(reader: R) -> LineReader<R> {
    LineReader::new(reader)
}

pub fn cursor<C: RowCursor>(rows: C) -> CursorProducer<C> {
    CursorProducer::new(rows)
}

pub fn from_stream<S>(stream: S) -> StreamSource<S>
where
    S: futures::Stream<Item = Value> + Unpin + Send,
{
    StreamSource::new(stream)
}
