// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal operations.
//!
//! A terminal closes the chain and returns a [`LastOperation`]. The stream
//! runs when the result is first read; the terminal publishes its result
//! at the end of the stream. `first` and `find` stop the run as soon as
//! they have their answer.

use crate::operation::{Downstream, Operation};
use crate::result::{LastOperation, ResultItem, ResultSlot};
use crate::signal::Signal;
use crate::stream::Stream;
use serde_json::Value;
use sluice_core::{reducers, Check, Filter, Item, Key, Reducer};
use sluice_error::Result;
use std::mem;

/// What a terminal does with the items reaching it.
trait Accumulate: Send {
    fn absorb(&mut self, item: Item, signal: &mut Signal) -> Result<()>;

    fn result(&mut self) -> ResultItem;
}

struct Terminal<A> {
    accumulator: A,
    slot: ResultSlot,
}

impl<A: Accumulate> Operation for Terminal<A> {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        self.accumulator.absorb(item, signal)
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        *self.slot.lock() = Some(self.accumulator.result());
        next.finish(signal)
    }
}

struct Entries {
    items: Vec<Item>,
    keep_keys: bool,
}

impl Accumulate for Entries {
    fn absorb(&mut self, item: Item, _signal: &mut Signal) -> Result<()> {
        let item = if self.keep_keys {
            item
        } else {
            Item::new(self.items.len(), item.value)
        };
        self.items.push(item);
        Ok(())
    }

    fn result(&mut self) -> ResultItem {
        ResultItem::entries(mem::take(&mut self.items))
    }
}

struct Count(usize);

impl Accumulate for Count {
    fn absorb(&mut self, _item: Item, _signal: &mut Signal) -> Result<()> {
        self.0 += 1;
        Ok(())
    }

    fn result(&mut self) -> ResultItem {
        ResultItem::found(Key::default(), Value::from(self.0))
    }
}

/// The first item accepted by the filter, if any.
struct Find<F> {
    filter: F,
    found: Option<Item>,
}

impl<F: Filter> Accumulate for Find<F> {
    fn absorb(&mut self, item: Item, signal: &mut Signal) -> Result<()> {
        if self.found.is_none() && self.filter.is_allowed(&item.value, &item.key, Check::Value)? {
            self.found = Some(item);
            signal.stop();
        }
        Ok(())
    }

    fn result(&mut self) -> ResultItem {
        self.found
            .take()
            .map_or_else(ResultItem::not_found, |item| ResultItem::found(item.key, item.value))
    }
}

struct Last(Option<Item>);

impl Accumulate for Last {
    fn absorb(&mut self, item: Item, _signal: &mut Signal) -> Result<()> {
        self.0 = Some(item);
        Ok(())
    }

    fn result(&mut self) -> ResultItem {
        self.0
            .take()
            .map_or_else(ResultItem::not_found, |item| ResultItem::found(item.key, item.value))
    }
}

struct Reduce<R>(R);

impl<R: Reducer> Accumulate for Reduce<R> {
    fn absorb(&mut self, item: Item, _signal: &mut Signal) -> Result<()> {
        self.0.consume(item.value)
    }

    fn result(&mut self) -> ResultItem {
        self.0
            .result()
            .map_or_else(ResultItem::not_found, |value| ResultItem::found(Key::default(), value))
    }
}

impl Stream {
    fn finish_with(self, accumulator: impl Accumulate + 'static) -> Result<LastOperation> {
        let slot = ResultSlot::default();
        let stream = self.append_terminal(Terminal {
            accumulator,
            slot: slot.clone(),
        })?;
        Ok(LastOperation::new(stream, slot))
    }

    /// All values, keyed `0..n`.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started or a terminal was already appended.
    pub fn collect(self) -> Result<LastOperation> {
        self.finish_with(Entries {
            items: Vec::new(),
            keep_keys: false,
        })
    }

    /// All items, with their keys.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn collect_with_keys(self) -> Result<LastOperation> {
        self.finish_with(Entries {
            items: Vec::new(),
            keep_keys: true,
        })
    }

    /// The number of items.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn count(self) -> Result<LastOperation> {
        self.finish_with(Count(0))
    }

    /// The first item; the source is not read any further.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn first(self) -> Result<LastOperation> {
        self.find(|_: &Value| true)
    }

    /// The first item whose value `filter` accepts.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn find<F: Filter + 'static>(self, filter: F) -> Result<LastOperation> {
        self.finish_with(Find {
            filter,
            found: None,
        })
    }

    /// The last item.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn last(self) -> Result<LastOperation> {
        self.finish_with(Last(None))
    }

    /// Fold the values with `reducer`; not found on an empty stream.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn reduce<R: Reducer + 'static>(self, reducer: R) -> Result<LastOperation> {
        self.finish_with(Reduce(reducer))
    }

    /// Fold the values into `initial` with `reduce`; `initial` on an empty stream.
    ///
    /// # Errors
    /// See [`collect`](Stream::collect).
    pub fn fold<F>(self, initial: Value, reduce: F) -> Result<LastOperation>
    where
        F: FnMut(Value, Value) -> Value + Send + 'static,
    {
        self.reduce(reducers::fold(initial, reduce))
    }
}
