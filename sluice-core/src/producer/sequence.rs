// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use sluice_error::Result;
use std::vec;

/// Bounded, in-memory sequence.
#[derive(Debug, Default)]
pub struct VecProducer {
    items: vec::IntoIter<Item>,
}

impl VecProducer {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl Producer for VecProducer {
    fn next_item(&mut self) -> Result<Option<Item>> {
        Ok(self.items.next())
    }

    fn count(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn last(&self) -> Option<Item> {
        self.items.as_slice().last().cloned()
    }

    fn destroy(&mut self) {
        self.items = Vec::new().into_iter();
    }
}

/// Any iterator of items. The count is known when the size hint is exact.
pub struct IterProducer<I> {
    items: Option<I>,
}

impl<I> IterProducer<I> {
    pub const fn new(items: I) -> Self {
        Self { items: Some(items) }
    }
}

impl<I> Producer for IterProducer<I>
where
    I: Iterator<Item = Item> + Send,
{
    fn next_item(&mut self) -> Result<Option<Item>> {
        Ok(self.items.as_mut().and_then(Iterator::next))
    }

    fn count(&self) -> Option<usize> {
        match self.items.as_ref().map(Iterator::size_hint) {
            None => Some(0),
            Some((lower, Some(upper))) if lower == upper => Some(lower),
            Some(_) => None,
        }
    }

    fn destroy(&mut self) {
        self.items = None;
    }
}

/// A resumable generator function; `Ok(None)` ends the sequence.
pub struct FnProducer<F> {
    generate: F,
    finished: bool,
}

impl<F> FnProducer<F> {
    pub const fn new(generate: F) -> Self {
        Self {
            generate,
            finished: false,
        }
    }
}

impl<F> Producer for FnProducer<F>
where
    F: FnMut() -> Result<Option<Item>> + Send,
{
    fn next_item(&mut self) -> Result<Option<Item>> {
        if self.finished {
            return Ok(None);
        }
        let next = (self.generate)()?;
        self.finished = next.is_none();
        Ok(next)
    }

    fn count(&self) -> Option<usize> {
        self.finished.then_some(0)
    }

    fn destroy(&mut self) {
        self.finished = true;
    }
}
