// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The [`Stream`] handle: sources, configuration and consumption.
//!
//! Operations are added by the `operations` modules, each in its own
//! `impl Stream` block.

use crate::driver::StreamCore;
use crate::iterator::StreamIterator;
use crate::operation::Operation;
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use sluice_core::producer::{self, PushHandle, PushProducer};
use sluice_core::{Item, Producer, SluiceError};
use sluice_error::Result;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A lazy pipeline over a sequence of key/value items.
///
/// Nothing runs until the stream is consumed. Builders take the handle by
/// value and return it, so a pipeline reads as one chain:
///
/// ```
/// use sluice_stream::Stream;
/// use serde_json::json;
///
/// let evens = Stream::of([5, 2, 8, 3, 4])
///     .filter(|v: &serde_json::Value| v.as_i64().is_some_and(|n| n % 2 == 0))?
///     .sort()?
///     .to_vec()?;
///
/// assert_eq!(evens, vec![json!(2), json!(4), json!(8)]);
/// # Ok::<(), sluice_stream::SluiceError>(())
/// ```
///
/// `Stream` is a cheap, cloneable handle: every clone refers to the same
/// pipeline. Clones are how a stream is named as the target of another
/// stream's `feed` or `dispatch`. A stream executes at most once.
#[derive(Clone)]
pub struct Stream {
    pub(crate) core: Arc<Mutex<StreamCore>>,
    inbox: PushHandle,
}

impl Stream {
    fn with_source(source: PushProducer) -> Self {
        let inbox = source.handle();
        Self {
            core: Arc::new(Mutex::new(StreamCore::new(source))),
            inbox,
        }
    }

    /// A stream without a source; items can still be pushed into it.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_source(PushProducer::new())
    }

    /// Values keyed `0..n`.
    pub fn of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_producer(producer::from_values(values))
    }

    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self::from_producer(producer::from_items(items))
    }

    pub fn from_producer(producer: impl Producer + 'static) -> Self {
        let mut source = PushProducer::new();
        source.add_source(Box::new(producer));
        Self::with_source(source)
    }

    /// Append another source, drained after the ones already present.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn join(self, producer: impl Producer + 'static) -> Result<Self> {
        self.lock("join")?.add_source(Box::new(producer))?;
        Ok(self)
    }

    /// Append a custom stage.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started or a
    /// terminal operation has been appended.
    pub fn append(self, operation: impl Operation + 'static) -> Result<Self> {
        self.lock("append")?.push_stage(Box::new(operation))?;
        Ok(self)
    }

    pub(crate) fn append_terminal(self, operation: impl Operation + 'static) -> Result<Self> {
        self.lock("append")?.push_terminal(Box::new(operation))?;
        Ok(self)
    }

    /// Install the handler offered every data error raised while items flow.
    ///
    /// Returning `true` skips the failing item; `false` stops the run, which
    /// still flushes buffered stages. Without a handler the first data error
    /// aborts the run without flushing.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn on_error<F>(self, handler: F) -> Result<Self>
    where
        F: FnMut(&SluiceError) -> bool + Send + 'static,
    {
        self.lock("on_error")?.set_error_handler(Box::new(handler))?;
        Ok(self)
    }

    /// Called once when the run completes without a fatal error.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn on_success<F>(self, hook: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        self.lock("on_success")?.add_success_hook(Box::new(hook))?;
        Ok(self)
    }

    /// Called once when the run ends, successfully or not.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] once execution has started.
    pub fn on_finish<F>(self, hook: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        self.lock("on_finish")?.add_finish_hook(Box::new(hook))?;
        Ok(self)
    }

    /// Execute the pipeline for its side effects.
    ///
    /// # Errors
    /// Returns [`SluiceError::AlreadyExecuted`] on a second execution, or the
    /// error that aborted the run.
    pub fn run(self) -> Result<()> {
        let mut core = self.lock("run")?;
        core.claim()?;
        core.run_to_end()
    }

    /// # Errors
    /// See [`run`](Stream::run).
    pub fn to_vec(self) -> Result<Vec<Value>> {
        self.collect()?.to_vec()
    }

    /// # Errors
    /// See [`run`](Stream::run).
    pub fn to_items(self) -> Result<Vec<Item>> {
        self.collect_with_keys()?.to_items()
    }

    /// The values as a JSON array.
    ///
    /// # Errors
    /// See [`run`](Stream::run).
    pub fn to_json(self) -> Result<String> {
        self.collect()?.to_json()
    }

    /// The items as a JSON object keyed by item key, in stream order.
    ///
    /// # Errors
    /// See [`run`](Stream::run).
    pub fn to_json_assoc(self) -> Result<String> {
        self.collect_with_keys()?.to_json_assoc()
    }

    /// Step through the results one item at a time.
    ///
    /// # Errors
    /// Returns [`SluiceError::AlreadyExecuted`] or
    /// [`SluiceError::ChainLocked`] when the stream can no longer be consumed.
    pub fn iter(self) -> Result<StreamIterator> {
        StreamIterator::attach(self)
    }

    /// Run `consumer` on every item.
    ///
    /// # Errors
    /// See [`run`](Stream::run).
    pub fn for_each<C>(self, consumer: C) -> Result<()>
    where
        C: sluice_core::Consumer + 'static,
    {
        self.call(consumer)?.run()
    }

    /// Release sources and buffers without running. The stream counts as executed.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] while the stream is executing.
    pub fn destroy(self) -> Result<()> {
        self.lock("destroy")?.destroy();
        Ok(())
    }

    /// `true` when both handles refer to the same pipeline.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }

    pub(crate) fn inbox(&self) -> PushHandle {
        self.inbox.clone()
    }

    /// Push `item` into this stream, or queue it when the stream is
    /// currently executing further up the call stack.
    pub(crate) fn deliver(&self, item: Item) -> Result<()> {
        match self.core.try_lock() {
            Some(mut core) => core.accept(item),
            None => {
                self.inbox.push(item);
                Ok(())
            }
        }
    }

    pub(crate) fn settle(&self) -> Result<()> {
        self.lock("execute")?.run_to_end()
    }

    /// Advance an interrupted execution; `true` once it is complete.
    pub(crate) fn step(&self) -> Result<bool> {
        let mut core = self.lock("iterate")?;
        core.resume()?;
        Ok(core.is_done())
    }

    pub(crate) fn lock(&self, action: &str) -> Result<MutexGuard<'_, StreamCore>> {
        self.core
            .try_lock()
            .ok_or_else(|| SluiceError::chain_locked(format!("{action}: the stream is executing")))
    }

    pub(crate) fn lock_for_delivery(&self) -> Result<MutexGuard<'_, StreamCore>> {
        self.core.try_lock().ok_or_else(|| {
            SluiceError::loop_detected("item routed back into a stream that is executing")
        })
    }
}

impl Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("core", &Arc::as_ptr(&self.core))
            .finish_non_exhaustive()
    }
}
