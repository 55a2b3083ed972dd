// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy, pull-driven pipelines over key/value items.
//!
//! A [`Stream`] owns a set of sources and a chain of stages. Building the
//! chain does nothing; consuming the stream (with [`run`](Stream::run),
//! [`to_vec`](Stream::to_vec), a terminal such as [`first`](Stream::first),
//! or an [`iter`](Stream::iter)ator) pulls items one at a time and pushes
//! each through the chain.
//!
//! # Architecture
//!
//! - **[`Operation`]**: a stage. It receives the [`Signal`] holding the
//!   current item and decides whether to hand it to the rest of the chain
//!   ([`Downstream`]), to buffer it, or to drop it.
//! - **[`Signal`]**: one per execution. Besides the item it carries the
//!   directives a stage can send back: stop, interrupt, limit reached,
//!   restart from a buffer.
//! - **End of stream**: when the sources are exhausted every stage gets a
//!   [`streaming_finished`](Operation::streaming_finished) call. Buffering
//!   stages (sort, reverse, tail, ...) replay what they hold into the stages
//!   after them, so the end of the stream travels down the chain once all
//!   buffers are drained.
//! - **Limit pushdown**: `limit(n)` right after a bounded stage lowers that
//!   stage's bound instead of adding a stage; `sort().limit(n)` keeps at most
//!   `n` items in memory.
//!
//! ## Operation groups
//!
//! | group | operations |
//! |-------|------------|
//! | filtering | `filter`, `filter_by`, `omit`, `omit_by`, `skip`, `limit`, `until`, `while_true`, `unique`, `unique_by` |
//! | mapping | `map`, `map_key`, `flip`, `reindex`, `flat`, `chunk`, `classify` |
//! | side effects | `call`, `send_to_max`, `collect_in`, `feed` |
//! | reordering | `sort`, `sort_by`, `rsort`, `reverse`, `best`, `worst`, `sort_limited`, `tail`, `shuffle`, `shuffle_chunks`, `shuffle_seeded`, `segregate` |
//! | extrema | `extrema`, `extrema_by`, `only_maxima`, `only_maxima_by`, `only_minima`, `only_minima_by` |
//! | routing | `fork`, `dispatch`, `group_by` |
//! | terminals | `collect`, `collect_with_keys`, `count`, `first`, `last`, `find`, `reduce`, `fold` |
//!
//! # Errors
//!
//! Data errors raised while items flow can be handled with
//! [`on_error`](Stream::on_error); without a handler the first one aborts
//! the run. Configuration mistakes are reported when the stage is added.
//!
//! ```
//! use sluice_core::mappers;
//! use sluice_stream::{Key, SluiceError, Stream};
//! use serde_json::{json, Value};
//!
//! let halves = Stream::of([2, 3, 4])
//!     .map(mappers::fallible(|v: Value, _: &Key| match v.as_i64() {
//!         Some(n) if n % 2 == 0 => Ok(json!(n / 2)),
//!         _ => Err(SluiceError::stream_error("odd")),
//!     }))?
//!     .on_error(|_| true)?
//!     .to_vec()?;
//!
//! assert_eq!(halves, vec![json!(1), json!(2)]);
//! # Ok::<(), SluiceError>(())
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod collection;
pub mod destination;
mod driver;
pub mod iterator;
pub mod operation;
pub mod operations;
pub mod result;
pub mod signal;
pub mod stream;

pub use collection::StreamCollection;
pub use destination::Destination;
pub use iterator::StreamIterator;
pub use operation::{Downstream, Limitable, Operation};
pub use operations::dispatch::Routes;
pub use result::{LastOperation, ResultItem};
pub use signal::Signal;
pub use stream::Stream;

pub use sluice_core::{
    Check, Collector, Comparator, Consumer, Discriminator, ErrorKind, Filter, Item, ItemComparator,
    Key, Mapper, Producer, Reducer, Result, SluiceError, Value,
};
