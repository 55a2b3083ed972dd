// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::collection::StreamCollection;
use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use parking_lot::Mutex;
use sluice_core::{Discriminator, Item, Key};
use sluice_error::{Result, SluiceError};
use std::mem;
use std::sync::Arc;

type GroupSlot = Arc<Mutex<Option<StreamCollection>>>;

pub(crate) struct GroupBy<D> {
    discriminator: D,
    reindex: bool,
    groups: StreamCollection,
    slot: GroupSlot,
}

impl<D: Discriminator> Operation for GroupBy<D> {
    fn handle(&mut self, signal: &mut Signal, _next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.take_item();
        let label = self.discriminator.classify(&item.value, &item.key)?;
        let label = Key::from_label(label, "group_by")?;
        let item = if self.reindex {
            Item::new(self.groups.group_len(&label), item.value)
        } else {
            item
        };
        self.groups.add(label, item);
        Ok(())
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        *self.slot.lock() = Some(mem::take(&mut self.groups));
        next.finish(signal)
    }

    fn destroy(&mut self) {
        self.groups = StreamCollection::default();
    }
}

impl Stream {
    /// Run the stream and group its items by label.
    ///
    /// Unlike the other operations this one is eager: it consumes the stream
    /// and returns the groups, in the order their labels were first seen.
    ///
    /// # Errors
    /// Returns [`SluiceError::AlreadyExecuted`] when the stream already ran,
    /// or the error that aborted the run.
    pub fn group_by<D: Discriminator + 'static>(self, discriminator: D) -> Result<StreamCollection> {
        self.group(discriminator, false)
    }

    /// Like [`group_by`](Stream::group_by), renumbering each group's keys from 0.
    ///
    /// # Errors
    /// See [`group_by`](Stream::group_by).
    pub fn group_by_reindexed<D: Discriminator + 'static>(
        self,
        discriminator: D,
    ) -> Result<StreamCollection> {
        self.group(discriminator, true)
    }

    fn group<D: Discriminator + 'static>(
        self,
        discriminator: D,
        reindex: bool,
    ) -> Result<StreamCollection> {
        let slot = GroupSlot::default();
        let stream = self.append_terminal(GroupBy {
            discriminator,
            reindex,
            groups: StreamCollection::default(),
            slot: slot.clone(),
        })?;
        {
            let mut core = stream.lock("group_by")?;
            core.claim()?;
            core.run_to_end()?;
        }
        let groups = slot.lock().take();
        groups.ok_or_else(|| SluiceError::stream_error("group_by: the stream produced no groups"))
    }
}
