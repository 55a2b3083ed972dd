// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use futures::executor::{block_on_stream, BlockingStream};
use futures::Stream;
use serde_json::Value;
use sluice_error::Result;

/// Values of an asynchronous stream, keyed from 0.
///
/// Each pull blocks the current thread until the stream yields its next value.
pub struct StreamSource<S: Stream + Unpin> {
    values: Option<BlockingStream<S>>,
    index: usize,
}

impl<S> StreamSource<S>
where
    S: Stream<Item = Value> + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            values: Some(block_on_stream(stream)),
            index: 0,
        }
    }
}

impl<S> Producer for StreamSource<S>
where
    S: Stream<Item = Value> + Unpin + Send,
{
    fn next_item(&mut self) -> Result<Option<Item>> {
        let Some(values) = self.values.as_mut() else {
            return Ok(None);
        };

        match values.next() {
            Some(value) => {
                let item = Item::new(self.index, value);
                self.index += 1;
                Ok(Some(item))
            }
            None => {
                self.values = None;
                Ok(None)
            }
        }
    }

    fn count(&self) -> Option<usize> {
        match self.values.as_ref().map(Iterator::size_hint) {
            None => Some(0),
            Some((lower, Some(upper))) if lower == upper => Some(lower),
            Some(_) => None,
        }
    }

    fn destroy(&mut self) {
        self.values = None;
    }
}
