// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Producer;
use crate::item::Item;
use sluice_error::Result;
use std::io::BufRead;

/// Lines of a reader, keyed by line number from 0, without their line terminator.
///
/// The reader is dropped when the input ends or the producer is destroyed.
pub struct LineReader<R> {
    reader: Option<R>,
    line: usize,
    buffer: String,
}

impl<R> LineReader<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            line: 0,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead + Send> Producer for LineReader<R> {
    fn next_item(&mut self) -> Result<Option<Item>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        self.buffer.clear();
        if reader.read_line(&mut self.buffer)? == 0 {
            self.reader = None;
            return Ok(None);
        }

        let text = self
            .buffer
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&self.buffer);
        let item = Item::new(self.line, text);
        self.line += 1;
        Ok(Some(item))
    }

    fn count(&self) -> Option<usize> {
        self.reader.is_none().then_some(0)
    }

    fn destroy(&mut self) {
        self.reader = None;
    }
}
