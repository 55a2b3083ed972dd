// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synthetic sequences. A `limit` of `None` makes a generator unbounded.

use super::Producer;
use crate::item::Item;
use fastrand::Rng;
use sluice_error::{Result, SluiceError};

/// `start, start + step, start + 2 * step, ...`
#[derive(Debug)]
pub struct SequentialInt {
    next: Option<i64>,
    step: i64,
    remaining: Option<usize>,
    index: usize,
}

/// # Errors
/// Returns [`SluiceError::InvalidArgument`] when `step` is 0.
pub fn sequential_int(start: i64, step: i64, limit: Option<usize>) -> Result<SequentialInt> {
    if step == 0 {
        return Err(SluiceError::invalid_argument(
            "sequential_int: step cannot be 0",
        ));
    }

    Ok(SequentialInt {
        next: Some(start),
        step,
        remaining: limit,
        index: 0,
    })
}

impl Producer for SequentialInt {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        let Some(current) = self.next else {
            return Ok(None);
        };

        self.next = current.checked_add(self.step);
        self.remaining = self.remaining.map(|r| r - 1);
        let item = Item::new(self.index, current);
        self.index += 1;
        Ok(Some(item))
    }

    fn count(&self) -> Option<usize> {
        self.remaining
    }

    fn destroy(&mut self) {
        self.remaining = Some(0);
    }
}

/// Uniformly random integers in `min..=max`.
#[derive(Debug)]
pub struct RandomInt {
    min: i64,
    max: i64,
    remaining: Option<usize>,
    index: usize,
    rng: Rng,
}

/// # Errors
/// Returns [`SluiceError::InvalidArgument`] unless `max > min`.
pub fn random_int(min: i64, max: i64, limit: Option<usize>) -> Result<RandomInt> {
    if max <= min {
        return Err(SluiceError::invalid_argument(format!(
            "random_int: max ({max}) must be greater than min ({min})"
        )));
    }

    Ok(RandomInt {
        min,
        max,
        remaining: limit,
        index: 0,
        rng: Rng::new(),
    })
}

impl RandomInt {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
}

impl Producer for RandomInt {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        self.remaining = self.remaining.map(|r| r - 1);

        let item = Item::new(self.index, self.rng.i64(self.min..=self.max));
        self.index += 1;
        Ok(Some(item))
    }

    fn count(&self) -> Option<usize> {
        self.remaining
    }

    fn destroy(&mut self) {
        self.remaining = Some(0);
    }
}

/// Random alphanumeric strings with a length in `min_len..=max_len`.
#[derive(Debug)]
pub struct RandomString {
    min_len: usize,
    max_len: usize,
    remaining: Option<usize>,
    index: usize,
    rng: Rng,
}

/// # Errors
/// Returns [`SluiceError::InvalidArgument`] when `max_len < min_len`.
pub fn random_string(
    min_len: usize,
    max_len: usize,
    limit: Option<usize>,
) -> Result<RandomString> {
    if max_len < min_len {
        return Err(SluiceError::invalid_argument(format!(
            "random_string: max length ({max_len}) cannot be less than min length ({min_len})"
        )));
    }

    Ok(RandomString {
        min_len,
        max_len,
        remaining: limit,
        index: 0,
        rng: Rng::new(),
    })
}

impl RandomString {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
}

impl Producer for RandomString {
    fn next_item(&mut self) -> Result<Option<Item>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        self.remaining = self.remaining.map(|r| r - 1);

        let length = self.rng.usize(self.min_len..=self.max_len);
        let text: String = (0..length).map(|_| self.rng.alphanumeric()).collect();
        let item = Item::new(self.index, text);
        self.index += 1;
        Ok(Some(item))
    }

    fn count(&self) -> Option<usize> {
        self.remaining
    }

    fn destroy(&mut self) {
        self.remaining = Some(0);
    }
}

/// The Collatz sequence from `start` down to and including 1.
#[derive(Debug)]
pub struct Collatz {
    next: Option<u64>,
    index: usize,
}

/// # Errors
/// Returns [`SluiceError::InvalidArgument`] when `start` is 0.
pub fn collatz(start: u64) -> Result<Collatz> {
    if start == 0 {
        return Err(SluiceError::invalid_argument(
            "collatz: start number must be at least 1",
        ));
    }

    Ok(Collatz {
        next: Some(start),
        index: 0,
    })
}

impl Producer for Collatz {
    fn next_item(&mut self) -> Result<Option<Item>> {
        let Some(current) = self.next else {
            return Ok(None);
        };

        self.next = match current {
            1 => None,
            n if n % 2 == 0 => Some(n / 2),
            n => n.checked_mul(3).and_then(|m| m.checked_add(1)),
        };
        let item = Item::new(self.index, current);
        self.index += 1;
        Ok(Some(item))
    }

    fn count(&self) -> Option<usize> {
        self.next.is_none().then_some(0)
    }

    fn destroy(&mut self) {
        self.next = None;
    }
}
