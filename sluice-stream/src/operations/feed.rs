// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use crate::stream::Stream;
use sluice_core::producer::PushHandle;
use sluice_error::Result;

enum Target {
    /// The feeding stream itself: items join its own source queue.
    Own(PushHandle),
    Other(Stream),
}

pub(crate) struct Feed {
    targets: Vec<Target>,
}

impl Operation for Feed {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        for target in &self.targets {
            let copy = signal.item().clone();
            match target {
                Target::Own(queue) => queue.push(copy),
                Target::Other(stream) => stream.deliver(copy)?,
            }
        }
        next.handle(signal)
    }
}

impl Stream {
    /// Push a copy of every item into each of `targets`, then forward it.
    ///
    /// Targets process pushed items as they arrive and drain their own
    /// sources when they are run. Feeding a stream into itself appends to
    /// its own source, which is how feedback loops are built:
    ///
    /// ```
    /// use sluice_core::Collector;
    /// use sluice_stream::Stream;
    /// use serde_json::{json, Value};
    ///
    /// let seen = Collector::new();
    /// let stream = Stream::of([1]);
    /// let this = stream.clone();
    ///
    /// stream
    ///     .limit(3)?
    ///     .collect_in(seen.clone(), false)?
    ///     .map(|v: Value| json!(v.as_i64().unwrap_or_default() + 1))?
    ///     .feed(vec![this])?
    ///     .run()?;
    ///
    /// assert_eq!(seen.values(), vec![json!(1), json!(2), json!(3)]);
    /// # Ok::<(), sluice_stream::SluiceError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`](sluice_error::SluiceError::ChainLocked)
    /// once execution has started.
    pub fn feed(self, targets: Vec<Stream>) -> Result<Self> {
        let targets = targets
            .into_iter()
            .map(|target| {
                if target.same_as(&self) {
                    Target::Own(self.inbox())
                } else {
                    Target::Other(target)
                }
            })
            .collect();
        self.append(Feed { targets })
    }
}
