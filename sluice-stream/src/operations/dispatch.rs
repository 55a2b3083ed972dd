// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::destination::Destination;
use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::{Discriminator, Key};
use sluice_error::{Result, SluiceError};
use std::collections::HashMap;
use std::fmt;

/// Destinations by label, for [`Stream::dispatch`].
///
/// ```
/// use serde_json::Value;
/// use sluice_core::Collector;
/// use sluice_stream::{Routes, Stream};
///
/// let small = Collector::new();
/// let large = Collector::new();
/// let routes = Routes::new()
///     .route("small", small.clone())
///     .route("large", large.clone());
///
/// Stream::of([1, 50, 3, 80])
///     .dispatch(
///         |v: &Value| Value::from(if v.as_i64() < Some(10) { "small" } else { "large" }),
///         routes,
///     )?
///     .run()?;
///
/// assert_eq!(small.len(), 2);
/// assert_eq!(large.len(), 2);
/// # Ok::<(), sluice_stream::SluiceError>(())
/// ```
#[derive(Default)]
pub struct Routes {
    handlers: Vec<Box<dyn Destination>>,
    index: HashMap<Key, usize>,
}

impl Routes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send items labelled `label` to `destination`, replacing any earlier route.
    #[must_use]
    pub fn route(mut self, label: impl Into<Key>, destination: impl Destination + 'static) -> Self {
        let label = label.into();
        let destination: Box<dyn Destination> = Box::new(destination);
        match self.index.get(&label) {
            Some(&position) => self.handlers[position] = destination,
            None => {
                self.index.insert(label, self.handlers.len());
                self.handlers.push(destination);
            }
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routes")
            .field("labels", &self.index.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Dispatch<D> {
    discriminator: D,
    routes: Routes,
}

impl<D: Discriminator> Operation for Dispatch<D> {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item();
        let label = self.discriminator.classify(&item.value, &item.key)?;
        let label = Key::from_label(label, "dispatch")?;
        let position = *self.routes.index.get(&label).ok_or_else(|| {
            SluiceError::contract_violation(format!("dispatch: no route for label {label}"))
        })?;
        self.routes.handlers[position].accept(item.clone())?;
        next.handle(signal)
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let stopped = signal.is_stopped();
        for handler in &mut self.routes.handlers {
            if stopped {
                handler.cancel()?;
            } else {
                handler.finish()?;
            }
        }
        next.finish(signal)
    }

    fn destroy(&mut self) {
        self.routes.handlers.clear();
        self.routes.index.clear();
    }
}

impl Stream {
    /// Send every item to the destination routed for its label, then forward it.
    ///
    /// Destinations are finished when this stream ends, or cancelled when it
    /// was stopped. An item whose label has no route is a contract violation.
    ///
    /// # Errors
    /// Returns [`SluiceError::LoopDetected`] when a route leads back into
    /// this stream.
    pub fn dispatch<D>(self, discriminator: D, routes: Routes) -> Result<Self>
    where
        D: Discriminator + 'static,
    {
        if routes.handlers.iter().any(|handler| handler.routes_to(&self)) {
            return Err(SluiceError::loop_detected(
                "dispatch: a route leads back into the dispatching stream",
            ));
        }
        self.append(Dispatch {
            discriminator,
            routes,
        })
    }
}
