// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-execution control object passed to every stage.

use sluice_core::{Item, Producer};
use std::fmt::{self, Debug};
use std::mem;

pub(crate) struct Restart {
    pub(crate) position: usize,
    pub(crate) items: Box<dyn Producer>,
}

/// The current item plus the directives a stage can send back to the driver.
///
/// There is exactly one `Signal` per execution. Stages borrow it for a single
/// step: they may read, replace or take the current item, but never keep it.
///
/// | directive | effect |
/// |-----------|--------|
/// | [`stop`](Signal::stop) | no further items are pulled; end-of-stream flush still runs |
/// | [`interrupt`](Signal::interrupt) | control returns to the caller after the current item |
/// | [`limit_reached`](Signal::limit_reached) | a bounded stage is saturated |
/// | [`restart_from`](Signal::restart_from) | replay a buffer into the chain from a stage on |
pub struct Signal {
    item: Item,
    empty: bool,
    stopped: bool,
    interrupted: bool,
    limit_reached: Option<usize>,
    restart: Option<Restart>,
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            item: Item::default(),
            empty: true,
            stopped: false,
            interrupted: false,
            limit_reached: None,
            restart: None,
        }
    }
}

impl Signal {
    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }

    /// Move the current item out, leaving the default item in its place.
    pub fn take_item(&mut self) -> Item {
        mem::take(&mut self.item)
    }

    pub fn set_item(&mut self, item: Item) {
        self.item = item;
    }

    /// `true` until the first item has been pulled from the source.
    #[must_use]
    pub const fn is_stream_empty(&self) -> bool {
        self.empty
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Report that the stage at `stage` accepts no more items.
    ///
    /// The driver stops the run when `stage` is the head of the active chain;
    /// otherwise the stage stops the run itself on its next item.
    pub fn limit_reached(&mut self, stage: usize) {
        self.limit_reached = Some(stage);
    }

    /// Replay `items` into the chain starting at the stage at `stage`.
    ///
    /// Called from [`streaming_finished`](crate::Operation::streaming_finished)
    /// by a flushing stage, which then returns without propagating the
    /// end of stream. Propagation resumes at `stage` once the replay is drained.
    pub fn restart_from(&mut self, stage: usize, items: impl Producer + 'static) {
        self.restart = Some(Restart {
            position: stage,
            items: Box::new(items),
        });
    }

    pub(crate) fn begin(&mut self, item: Item) {
        self.item = item;
        self.empty = false;
    }

    pub(crate) fn resume(&mut self) {
        self.interrupted = false;
    }

    pub(crate) fn take_limit_reached(&mut self) -> Option<usize> {
        self.limit_reached.take()
    }

    /// A restart opens a new pass, so a previous `stop` no longer applies.
    pub(crate) fn take_restart(&mut self) -> Option<Restart> {
        let restart = self.restart.take()?;
        self.stopped = false;
        self.limit_reached = None;
        Some(restart)
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("item", &self.item)
            .field("empty", &self.empty)
            .field("stopped", &self.stopped)
            .field("interrupted", &self.interrupted)
            .field("limit_reached", &self.limit_reached)
            .field("restart", &self.restart.as_ref().map(|r| r.position))
            .finish()
    }
}
