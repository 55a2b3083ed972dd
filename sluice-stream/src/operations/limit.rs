// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `skip` and `limit`.
//!
//! Appending `limit(n)` right after a bounded stage (a limited sort, another
//! limit, `segregate`) does not add a stage: the bound of that stage is
//! lowered to `n` instead.

use crate::operation::{Downstream, Limitable, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_error::Result;

pub(crate) struct Skip {
    remaining: usize,
}

impl Operation for Skip {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Ok(());
        }
        next.handle(signal)
    }
}

pub(crate) struct Limit {
    limit: usize,
    count: usize,
}

impl Operation for Limit {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.count >= self.limit {
            signal.stop();
            return Ok(());
        }

        self.count += 1;
        next.handle(signal)?;
        if self.count == self.limit {
            signal.limit_reached(next.current());
        }
        Ok(())
    }

    fn as_limitable(&mut self) -> Option<&mut dyn Limitable> {
        Some(self)
    }
}

impl Limitable for Limit {
    fn apply_limit(&mut self, limit: usize) {
        self.limit = self.limit.min(limit);
    }

    fn limit(&self) -> usize {
        self.limit
    }
}

impl Stream {
    /// Drop the first `count` items.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn skip(self, count: usize) -> Result<Self> {
        if count == 0 {
            return Ok(self);
        }
        self.append(Skip { remaining: count })
    }

    /// Forward at most `limit` items, then stop the run.
    ///
    /// `limit(0)` forwards nothing: the run stops at the first item.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn limit(self, limit: usize) -> Result<Self> {
        // Bounded stages reject a zero bound, so 0 always gets its own stage.
        if limit > 0 && self.lock("limit")?.push_down_limit(limit)? {
            return Ok(self);
        }
        self.append(Limit { limit, count: 0 })
    }
}
