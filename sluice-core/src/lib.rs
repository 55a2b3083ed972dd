// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Item model, strategy contracts and lazy producers shared by every Sluice crate.
//!
//! An [`Item`] is a [`Key`] paired with a JSON [`Value`]. Producers yield
//! items lazily; filters, mappers, comparators, discriminators, reducers and
//! consumers are the pluggable strategies that pipeline stages are built from.

pub mod check;
pub mod comparator;
pub mod consumers;
pub mod discriminators;
pub mod filters;
pub mod item;
pub mod key;
pub mod mappers;
pub mod producer;
pub mod reducers;
pub mod value;

pub use self::check::Check;
pub use self::comparator::{Comparator, ItemComparator};
pub use self::consumers::{Collector, Consumer};
pub use self::discriminators::Discriminator;
pub use self::filters::Filter;
pub use self::item::Item;
pub use self::key::Key;
pub use self::mappers::Mapper;
pub use self::producer::Producer;
pub use self::reducers::Reducer;
pub use serde_json::Value;
pub use sluice_error::{ErrorKind, IntoSluiceError, Result, ResultExt, SluiceError};
