// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtering stages: `filter`, `omit`, `until` and `while_true`.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::{Check, Filter};
use sluice_error::Result;

pub(crate) struct FilterStage<F> {
    filter: F,
    mode: Check,
    keep: bool,
}

impl<F: Filter> Operation for FilterStage<F> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item();
        if self.filter.is_allowed(&item.value, &item.key, self.mode)? == self.keep {
            next.handle(signal)?;
        }
        Ok(())
    }
}

/// Stops the run at the first item on which the filter returns `stop_on`.
/// That item is not forwarded.
pub(crate) struct StopWhen<F> {
    filter: F,
    mode: Check,
    stop_on: bool,
}

impl<F: Filter> Operation for StopWhen<F> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item();
        if self.filter.is_allowed(&item.value, &item.key, self.mode)? == self.stop_on {
            signal.stop();
            return Ok(());
        }
        next.handle(signal)
    }
}

impl Stream {
    /// Keep items whose value passes `filter`.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started or a terminal operation has been appended.
    pub fn filter<F: Filter + 'static>(self, filter: F) -> Result<Self> {
        self.filter_by(filter, Check::Value)
    }

    /// Keep items passing `filter` applied as `mode` dictates.
    ///
    /// # Errors
    /// See [`filter`](Stream::filter).
    pub fn filter_by<F: Filter + 'static>(self, filter: F, mode: Check) -> Result<Self> {
        self.append(FilterStage {
            filter,
            mode,
            keep: true,
        })
    }

    /// Drop items whose value passes `filter`.
    ///
    /// # Errors
    /// See [`filter`](Stream::filter).
    pub fn omit<F: Filter + 'static>(self, filter: F) -> Result<Self> {
        self.omit_by(filter, Check::Value)
    }

    /// # Errors
    /// See [`filter`](Stream::filter).
    pub fn omit_by<F: Filter + 'static>(self, filter: F, mode: Check) -> Result<Self> {
        self.append(FilterStage {
            filter,
            mode,
            keep: false,
        })
    }

    /// Stop at the first item whose value passes `filter`.
    ///
    /// # Errors
    /// See [`filter`](Stream::filter).
    pub fn until<F: Filter + 'static>(self, filter: F) -> Result<Self> {
        self.append(StopWhen {
            filter,
            mode: Check::Value,
            stop_on: true,
        })
    }

    /// Forward items while their value passes `filter`; stop at the first that does not.
    ///
    /// # Errors
    /// See [`filter`](Stream::filter).
    pub fn while_true<F: Filter + 'static>(self, filter: F) -> Result<Self> {
        self.append(StopWhen {
            filter,
            mode: Check::Value,
            stop_on: false,
        })
    }
}
