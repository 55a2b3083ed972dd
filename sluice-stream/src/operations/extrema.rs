// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Local extrema (turning points) of a sequence of values.
//!
//! One pass, constant memory: the stage remembers the previous item and the
//! direction of the last change. A point is emitted when the direction
//! reverses; runs of equal values merge into a single plateau, and leaving
//! a plateau emits nothing. With `with_limits` the first and the last point
//! of the sequence are emitted as well, as long as the sequence is not flat
//! at that end. A sequence of a single value counts as one upward end, so
//! that value is emitted as a maximum.
//!
//! ```text
//! [3, 2, 4, 5, 3]  with limits:    [3, 2, 5, 3]
//!                  without limits: [2, 5]
//! [4, 4, 3, 3, 3]                  []
//! [7]              with limits:    [7]
//! ```
//!
//! Points are ordered by their values unless an [`ItemComparator`] says
//! otherwise.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::{Check, Comparator, Item, ItemComparator};
use sluice_error::Result;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Flat,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keep {
    All,
    Maxima,
    Minima,
}

impl Keep {
    const fn accepts(self, is_maximum: bool) -> bool {
        match self {
            Self::All => true,
            Self::Maxima => is_maximum,
            Self::Minima => !is_maximum,
        }
    }
}

pub(crate) struct Extrema {
    with_limits: bool,
    keep: Keep,
    previous: Option<Item>,
    direction: Direction,
    first_comparison: bool,
    comparator: ItemComparator,
}

impl Extrema {
    fn new(with_limits: bool, keep: Keep, comparator: ItemComparator) -> Self {
        Self {
            with_limits,
            keep,
            previous: None,
            // A lone value closes an upward run.
            direction: if with_limits { Direction::Up } else { Direction::Flat },
            first_comparison: true,
            comparator,
        }
    }

    fn emit(
        &self,
        point: Item,
        is_maximum: bool,
        signal: &mut Signal,
        next: &mut Downstream<'_>,
    ) -> Result<()> {
        if !self.keep.accepts(is_maximum) {
            return Ok(());
        }
        signal.set_item(point);
        next.handle(signal)
    }
}

impl Operation for Extrema {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        let Some(previous) = &self.previous else {
            self.previous = Some(item);
            return Ok(());
        };

        let direction = match self.comparator.compare(&item, previous) {
            Ordering::Equal => {
                self.direction = Direction::Flat;
                self.first_comparison = false;
                return Ok(());
            }
            Ordering::Greater => Direction::Up,
            Ordering::Less => Direction::Down,
        };

        let turning = if self.first_comparison {
            self.first_comparison = false;
            // The leading point peaks when the sequence starts downwards.
            self.with_limits.then_some(direction == Direction::Down)
        } else {
            match (self.direction, direction) {
                (Direction::Up, Direction::Down) => Some(true),
                (Direction::Down, Direction::Up) => Some(false),
                _ => None,
            }
        };

        self.direction = direction;
        let point = self.previous.replace(item);
        match (turning, point) {
            (Some(is_maximum), Some(point)) => self.emit(point, is_maximum, signal, next),
            _ => Ok(()),
        }
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.with_limits && self.direction != Direction::Flat {
            if let Some(last) = self.previous.take() {
                self.emit(last, self.direction == Direction::Up, signal, next)?;
            }
        }
        next.finish(signal)
    }

    fn destroy(&mut self) {
        self.previous = None;
    }
}

impl Stream {
    /// Emit the local maxima and minima, keys preserved.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn extrema(self, with_limits: bool) -> Result<Self> {
        self.append(Extrema::new(with_limits, Keep::All, ItemComparator::natural()))
    }

    /// [`extrema`](Stream::extrema) with points ordered by `comparator` in `mode`.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`](sluice_error::SluiceError::InvalidArgument)
    /// when `mode` cannot order items with this comparator.
    pub fn extrema_by(
        self,
        with_limits: bool,
        comparator: Comparator,
        mode: Check,
    ) -> Result<Self> {
        let comparator = ItemComparator::new(comparator, mode)?;
        self.append(Extrema::new(with_limits, Keep::All, comparator))
    }

    /// Like [`extrema`](Stream::extrema), keeping the peaks only.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn only_maxima(self, with_limits: bool) -> Result<Self> {
        self.append(Extrema::new(with_limits, Keep::Maxima, ItemComparator::natural()))
    }

    /// [`only_maxima`](Stream::only_maxima) under `comparator`.
    ///
    /// # Errors
    /// Same as [`extrema_by`](Stream::extrema_by).
    pub fn only_maxima_by(
        self,
        with_limits: bool,
        comparator: Comparator,
        mode: Check,
    ) -> Result<Self> {
        let comparator = ItemComparator::new(comparator, mode)?;
        self.append(Extrema::new(with_limits, Keep::Maxima, comparator))
    }

    /// Like [`extrema`](Stream::extrema), keeping the valleys only.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn only_minima(self, with_limits: bool) -> Result<Self> {
        self.append(Extrema::new(with_limits, Keep::Minima, ItemComparator::natural()))
    }

    /// [`only_minima`](Stream::only_minima) under `comparator`.
    ///
    /// # Errors
    /// Same as [`extrema_by`](Stream::extrema_by).
    pub fn only_minima_by(
        self,
        with_limits: bool,
        comparator: Comparator,
        mode: Check,
    ) -> Result<Self> {
        let comparator = ItemComparator::new(comparator, mode)?;
        self.append(Extrema::new(with_limits, Keep::Minima, comparator))
    }
}
