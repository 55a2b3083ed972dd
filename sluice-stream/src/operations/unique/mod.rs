// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Drop items already seen.
//!
//! Values and keys are remembered in separate stores, and only for items
//! that pass. The mode decides what "seen" means:
//!
//! | mode    | an item is dropped when            |
//! |---------|------------------------------------|
//! | `Value` | its value was seen                 |
//! | `Key`   | its key was seen                   |
//! | `Both`  | its value or its key was seen      |
//! | `Any`   | its value and its key were both seen |
//!
//! A four-argument comparator sees whole `(key, value)` pairs, so it only
//! makes sense in `Both` and `Any` mode, where both behave the same: an item
//! is dropped when the comparator finds it equal to an accepted one.

mod store;

use self::store::Store;
use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::comparator::QuaternaryComparison;
use sluice_core::{Check, Comparator, Item};
use sluice_error::{Result, SluiceError};
use std::cmp::Ordering;
use std::sync::Arc;

enum Checker {
    Split {
        mode: Check,
        values: Store,
        keys: Store,
    },
    Pairs {
        comparison: Arc<QuaternaryComparison>,
        seen: Vec<Item>,
    },
}

impl Checker {
    fn new(comparator: Comparator, mode: Check) -> Result<Self> {
        let store = || match &comparator {
            Comparator::Binary(comparison) => Store::scan(Arc::clone(comparison)),
            _ => Store::natural(),
        };

        match (&comparator, mode) {
            (Comparator::Quaternary(_), Check::Value | Check::Key) => {
                Err(SluiceError::invalid_argument(format!(
                    "unique: a four-argument comparator requires mode Both or Any, got {mode:?}"
                )))
            }
            (Comparator::Quaternary(comparison), _) => Ok(Self::Pairs {
                comparison: Arc::clone(comparison),
                seen: Vec::new(),
            }),
            _ => Ok(Self::Split {
                mode,
                values: store(),
                keys: store(),
            }),
        }
    }

    /// `true` when `item` passes; a passing item is remembered.
    fn accept(&mut self, item: &Item) -> bool {
        match self {
            Self::Split { mode, values, keys } => {
                let key = item.key.to_value();
                let duplicate = match mode {
                    Check::Value => values.contains(&item.value),
                    Check::Key => keys.contains(&key),
                    Check::Both => values.contains(&item.value) || keys.contains(&key),
                    Check::Any => values.contains(&item.value) && keys.contains(&key),
                };
                if duplicate {
                    return false;
                }
                if *mode != Check::Key {
                    values.remember(item.value.clone());
                }
                if *mode != Check::Value {
                    keys.remember(key);
                }
                true
            }
            Self::Pairs { comparison, seen } => {
                let duplicate = seen.iter().any(|known| {
                    comparison(&item.value, &known.value, &item.key, &known.key) == Ordering::Equal
                });
                if !duplicate {
                    seen.push(item.clone());
                }
                !duplicate
            }
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Split { values, keys, .. } => {
                values.clear();
                keys.clear();
            }
            Self::Pairs { seen, .. } => seen.clear(),
        }
    }
}

pub(crate) struct Unique {
    checker: Checker,
}

impl Operation for Unique {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        if self.checker.accept(signal.item()) {
            next.handle(signal)
        } else {
            Ok(())
        }
    }

    fn destroy(&mut self) {
        self.checker.clear();
    }
}

impl Stream {
    /// Drop items whose value was already seen.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn unique(self) -> Result<Self> {
        self.unique_by(Comparator::Natural, Check::Value)
    }

    /// Drop items already seen under `comparator`, as selected by `mode`.
    ///
    /// # Errors
    /// Returns [`SluiceError::InvalidArgument`] for a four-argument
    /// comparator in `Value` or `Key` mode.
    pub fn unique_by(self, comparator: Comparator, mode: Check) -> Result<Self> {
        let checker = Checker::new(comparator, mode)?;
        self.append(Unique { checker })
    }
}
