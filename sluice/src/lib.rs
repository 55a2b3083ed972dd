// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sluice
//!
//! A lazy stream processing engine for sequences of key/value pairs.
//!
//! ## Overview
//!
//! A [`Stream`] is a chain of stages over one or more sources. Nothing runs
//! while the chain is built; a terminal consumption pulls items one at a
//! time through every stage. Stages that need look-ahead (sorting, tail,
//! shuffle, fork) buffer explicitly and replay at the end of the stream.
//!
//! The workspace is split the same way this crate re-exports it:
//!
//! - `sluice-error`: [`SluiceError`] and its classification
//! - `sluice-core`: [`Item`], [`Key`], strategy contracts and built-ins, producers
//! - `sluice-stream`: the engine and every operation
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::prelude::*;
//!
//! let top = Stream::of([7, 3, 9, 1, 8, 2])
//!     .filter(|v: &Value| v.as_i64() != Some(8))?
//!     .worst(2)?
//!     .to_vec()?;
//!
//! assert_eq!(top, vec![json!(9), json!(7)]);
//! # Ok::<(), SluiceError>(())
//! ```
//!
//! Infinite sources are fine as long as something stops the run:
//!
//! ```rust
//! use sluice::prelude::*;
//!
//! let squares = Stream::from_producer(producer::sequential_int(1, 1, None)?)
//!     .map(|v: Value| json!(v.as_i64().unwrap_or_default().pow(2)))?
//!     .limit(4)?
//!     .to_vec()?;
//!
//! assert_eq!(squares, vec![json!(1), json!(4), json!(9), json!(16)]);
//! # Ok::<(), SluiceError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: route the engine's log events through `tracing`.

pub use sluice_core::{
    comparator, consumers, discriminators, filters, mappers, producer, reducers, value,
};
pub use sluice_core::{
    Check, Collector, Comparator, Consumer, Discriminator, Filter, Item, ItemComparator, Key,
    Mapper, Producer, Reducer,
};
pub use sluice_error::{ErrorKind, IntoSluiceError, Result, ResultExt, SluiceError};
pub use sluice_stream::{
    Destination, Downstream, LastOperation, Limitable, Operation, ResultItem, Routes, Signal,
    Stream, StreamCollection, StreamIterator,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        consumers, discriminators, filters, mappers, producer, reducers, Check, Collector,
        Comparator, Item, ItemComparator, Key, LastOperation, Routes, SluiceError, Stream,
    };
    pub use serde_json::{json, Value};
}
