// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Built-in stages. Each module adds its builder methods to [`Stream`](crate::Stream).

pub mod call;
pub mod dispatch;
pub mod extrema;
pub mod feed;
pub mod filter;
pub mod flat;
pub mod fork;
pub mod group_by;
pub mod limit;
pub mod map;
pub mod reverse;
pub mod segregate;
pub mod shuffle;
pub mod sort_limited;
pub mod tail;
pub mod terminals;
pub mod unique;
