// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The loop that moves items from the active source through the chain.
//!
//! ```text
//! Ready ──start──▶ Pulling ──source drained / stop──▶ Finishing ──▶ Done
//!                    ▲                                    │
//!                    └──────────── restart_from ──────────┘
//! ```
//!
//! `Pulling` pulls one item at a time into the [`Signal`] and hands it to the
//! head of the active chain. `Finishing` propagates the end of stream from the
//! head; a flushing stage may answer with a restart, which makes its buffer
//! the active source and the stage after it the new head.

use crate::operation::{Downstream, Operation};
use crate::signal::Signal;
use sluice_core::producer::{PushProducer, Resumable};
use sluice_core::{Item, Producer};
use sluice_error::{Result, SluiceError};
use std::mem;

pub(crate) type ErrorHandler = Box<dyn FnMut(&SluiceError) -> bool + Send>;
pub(crate) type Hook = Box<dyn FnMut() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Ready,
    Pulling,
    Finishing,
    Done,
}

pub(crate) struct StreamCore {
    stages: Vec<Box<dyn Operation>>,
    source: PushProducer,
    active: Option<Resumable>,
    phase: Phase,
    head: usize,
    signal: Signal,
    on_error: Option<ErrorHandler>,
    on_success: Vec<Hook>,
    on_finish: Vec<Hook>,
    sealed: bool,
    executed: bool,
    failure: Option<SluiceError>,
}

impl StreamCore {
    pub(crate) fn new(source: PushProducer) -> Self {
        Self {
            stages: Vec::new(),
            source,
            active: None,
            phase: Phase::Ready,
            head: 0,
            signal: Signal::default(),
            on_error: None,
            on_success: Vec::new(),
            on_finish: Vec::new(),
            sealed: false,
            executed: false,
            failure: None,
        }
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.phase != Phase::Ready || self.executed {
            return Err(SluiceError::chain_locked("execution has already started"));
        }
        if self.sealed {
            return Err(SluiceError::chain_locked(
                "a terminal operation has already been appended",
            ));
        }
        Ok(())
    }

    pub(crate) fn push_stage(&mut self, stage: Box<dyn Operation>) -> Result<()> {
        self.ensure_open()?;
        self.stages.push(stage);
        Ok(())
    }

    pub(crate) fn push_terminal(&mut self, stage: Box<dyn Operation>) -> Result<()> {
        self.push_stage(stage)?;
        self.sealed = true;
        Ok(())
    }

    /// Lower the bound of the last stage when it is limitable.
    pub(crate) fn push_down_limit(&mut self, limit: usize) -> Result<bool> {
        self.ensure_open()?;
        Ok(self
            .stages
            .last_mut()
            .and_then(|stage| stage.as_limitable())
            .map(|stage| stage.apply_limit(limit))
            .is_some())
    }

    pub(crate) fn add_source(&mut self, producer: Box<dyn Producer>) -> Result<()> {
        self.ensure_open()?;
        self.source.add_source(producer);
        Ok(())
    }

    pub(crate) fn set_error_handler(&mut self, handler: ErrorHandler) -> Result<()> {
        self.ensure_open()?;
        self.on_error = Some(handler);
        Ok(())
    }

    pub(crate) fn add_success_hook(&mut self, hook: Hook) -> Result<()> {
        self.ensure_open()?;
        self.on_success.push(hook);
        Ok(())
    }

    pub(crate) fn add_finish_hook(&mut self, hook: Hook) -> Result<()> {
        self.ensure_open()?;
        self.on_finish.push(hook);
        Ok(())
    }

    pub(crate) const fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Claim the single execution of this stream.
    pub(crate) fn claim(&mut self) -> Result<()> {
        if self.executed {
            return Err(SluiceError::AlreadyExecuted);
        }
        self.executed = true;
        Ok(())
    }

    /// Run to completion, or return the cached failure of an earlier run.
    pub(crate) fn run_to_end(&mut self) -> Result<()> {
        self.executed = true;
        while !self.is_done() {
            self.resume()?;
        }
        self.cached_failure()
    }

    /// Drive until the run completes or a stage interrupts it.
    pub(crate) fn resume(&mut self) -> Result<()> {
        self.cached_failure()?;
        self.start();
        self.signal.resume();

        loop {
            match self.phase {
                Phase::Ready => self.start(),
                Phase::Pulling => {
                    if self.signal.is_stopped() {
                        self.phase = Phase::Finishing;
                        continue;
                    }
                    if self.signal.is_interrupted() {
                        return Ok(());
                    }
                    let pulled = match self.active.as_mut() {
                        Some(active) => active.advance(),
                        None => Ok(None),
                    };
                    match pulled {
                        Ok(Some(item)) => self.process(item)?,
                        Ok(None) => self.phase = Phase::Finishing,
                        Err(error) => return Err(self.fail(error)),
                    }
                }
                Phase::Finishing => {
                    let (mut chain, signal) = self.active_chain();
                    if let Err(error) = chain.finish(signal) {
                        return Err(self.fail(error));
                    }
                    match self.signal.take_restart() {
                        Some(restart) => {
                            self.head = restart.position;
                            self.release_active();
                            self.active = Some(Resumable::new(restart.items));
                            self.phase = Phase::Pulling;
                        }
                        None => self.complete(),
                    }
                }
                Phase::Done => return Ok(()),
            }
        }
    }

    /// Push-mode delivery of a single item.
    pub(crate) fn accept(&mut self, item: Item) -> Result<()> {
        self.cached_failure()?;
        match self.phase {
            Phase::Ready => self.start(),
            Phase::Pulling => {}
            Phase::Finishing | Phase::Done => return Err(SluiceError::AlreadyExecuted),
        }
        if self.signal.is_stopped() {
            return Ok(());
        }
        self.process(item)
    }

    /// Destroy the own sources, then flush what has been received so far.
    pub(crate) fn cancel(&mut self) -> Result<()> {
        self.source.destroy();
        if let Some(active) = self.active.as_mut() {
            active.destroy();
        }
        self.run_to_end()
    }

    /// Tear everything down without flushing.
    pub(crate) fn destroy(&mut self) {
        self.source.destroy();
        self.release_active();
        self.release_stages();
        self.executed = true;
        self.phase = Phase::Done;
    }

    fn start(&mut self) {
        if self.phase == Phase::Ready {
            debug!("stream execution started with {} stages", self.stages.len());
            let source = mem::take(&mut self.source);
            self.active = Some(Resumable::new(Box::new(source)));
            self.phase = Phase::Pulling;
        }
    }

    fn process(&mut self, item: Item) -> Result<()> {
        self.signal.begin(item);
        let (mut chain, signal) = self.active_chain();
        if let Err(error) = chain.handle(signal) {
            self.recover(error)?;
        }
        if self.signal.take_limit_reached() == Some(self.head) {
            self.signal.stop();
        }
        Ok(())
    }

    /// The chain from the current head on, with the signal it runs against.
    fn active_chain(&mut self) -> (Downstream<'_>, &mut Signal) {
        let head = self.head;
        let stages = self.stages.get_mut(head..).unwrap_or_default();
        (Downstream::new(stages, head), &mut self.signal)
    }

    fn recover(&mut self, error: SluiceError) -> Result<()> {
        if error.is_data_error() {
            if let Some(handler) = self.on_error.as_mut() {
                if handler(&error) {
                    warn!("item skipped after error: {}", error);
                } else {
                    warn!("run aborted by error handler: {}", error);
                    self.signal.stop();
                }
                return Ok(());
            }
        }
        Err(self.fail(error))
    }

    fn fail(&mut self, error: SluiceError) -> SluiceError {
        error!("stream execution failed: {}", error);
        self.release_active();
        self.release_stages();
        self.phase = Phase::Done;
        self.failure = Some(error.clone());
        for hook in &mut self.on_finish {
            hook();
        }
        error
    }

    fn complete(&mut self) {
        debug!("stream execution finished");
        self.phase = Phase::Done;
        self.release_active();
        self.release_stages();
        for hook in &mut self.on_success {
            hook();
        }
        for hook in &mut self.on_finish {
            hook();
        }
    }

    fn release_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.destroy();
        }
    }

    fn release_stages(&mut self) {
        for stage in self.stages.iter_mut().rev() {
            stage.destroy();
        }
    }

    fn cached_failure(&self) -> Result<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
