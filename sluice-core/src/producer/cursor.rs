// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use serde_json::Value;
use sluice_error::Result;

/// An external, cursor-style row source such as a database statement.
pub trait RowCursor: Send {
    /// Fetch the next row; `None` when the cursor is drained.
    ///
    /// # Errors
    /// Returns an error when the external source fails.
    fn fetch(&mut self) -> Result<Option<Value>>;

    /// Release the cursor. Called exactly once.
    fn close(&mut self) {}
}

/// Rows of a [`RowCursor`], keyed by row number from 0.
///
/// The cursor is closed when it is drained, when the producer is destroyed,
/// or when the producer is dropped, whichever comes first.
pub struct CursorProducer<C: RowCursor> {
    rows: C,
    open: bool,
    index: usize,
}

impl<C: RowCursor> CursorProducer<C> {
    pub const fn new(rows: C) -> Self {
        Self {
            rows,
            open: true,
            index: 0,
        }
    }
}

impl<C: RowCursor> Producer for CursorProducer<C> {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if !self.open {
            return Ok(None);
        }

        match self.rows.fetch()? {
            Some(row) => {
                let item = Item::new(self.index, row);
                self.index += 1;
                Ok(Some(item))
            }
            None => {
                self.destroy();
                Ok(None)
            }
        }
    }

    fn count(&self) -> Option<usize> {
        (!self.open).then_some(0)
    }

    fn destroy(&mut self) {
        if self.open {
            self.open = false;
            self.rows.close();
        }
    }
}

impl<C: RowCursor> Drop for CursorProducer<C> {
    fn drop(&mut self) {
        self.destroy();
    }
}
