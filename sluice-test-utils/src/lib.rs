// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the sluice workspace.
//!
//! Meant for tests and benchmarks only.
//!
//! # Module Organization
//!
//! - `test_data` - JSON fixtures: people, items with repeated keys and values
//! - `person` - The `Person` record behind the people fixtures
//! - `error_injection` - Producers that fail at a given item or track how they are read
//! - `helpers` - Assertion and conversion helpers
//!
//! ```rust
//! use sluice_core::producer::{self, Producer};
//! use sluice_test_utils::TrackedProducer;
//!
//! let (mut source, tracker) = TrackedProducer::new(producer::from_values([1, 2, 3]));
//! source.next_item().unwrap();
//! source.destroy();
//!
//! assert_eq!(tracker.pulled(), 1);
//! assert!(tracker.destroyed());
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod helpers;
pub mod person;
pub mod test_data;

pub use error_injection::{ErrorInjectingProducer, TrackedProducer, Tracker};
pub use helpers::{assert_permutation, ints, pairs, random_ints};
pub use person::Person;
