// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Results of terminal operations.

use crate::stream::Stream;
use parking_lot::Mutex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use sluice_core::value::display_value;
use sluice_core::{Item, Key};
use sluice_error::{Result, SluiceError};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::Arc;

pub(crate) type ResultSlot = Arc<Mutex<Option<ResultItem>>>;

/// What a terminal operation produced.
///
/// Single-value terminals (`first`, `count`, `reduce`, ...) fill `key` and
/// `value`; collecting terminals also keep the collected `entries`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    found: bool,
    key: Key,
    value: Value,
    entries: Option<Vec<Item>>,
}

impl ResultItem {
    pub(crate) fn found(key: Key, value: Value) -> Self {
        Self {
            found: true,
            key,
            value,
            entries: None,
        }
    }

    pub(crate) fn not_found() -> Self {
        Self {
            found: false,
            key: Key::default(),
            value: Value::Null,
            entries: None,
        }
    }

    pub(crate) fn entries(entries: Vec<Item>) -> Self {
        Self {
            found: true,
            key: Key::default(),
            value: Value::Array(entries.iter().map(|item| item.value.clone()).collect()),
            entries: Some(entries),
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.found
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        !self.found
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    #[must_use]
    pub fn tuple(&self) -> (Key, Value) {
        (self.key.clone(), self.value.clone())
    }

    /// Collected entries, the found item, or nothing.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        match &self.entries {
            Some(entries) => entries.clone(),
            None if self.found => vec![Item::new(self.key.clone(), self.value.clone())],
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        match (&self.entries, &self.value) {
            (Some(entries), _) => entries.iter().map(|item| item.value.clone()).collect(),
            (None, Value::Array(values)) => values.clone(),
            _ if self.found => vec![self.value.clone()],
            _ => Vec::new(),
        }
    }

    /// # Errors
    /// Returns [`SluiceError::StreamProcessingError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.value)
            .map_err(|e| SluiceError::stream_error(format!("serializing result: {e}")))
    }

    /// The items as one JSON object keyed by item key.
    ///
    /// Fields keep stream order; a repeated key keeps its first position and
    /// its last value.
    ///
    /// # Errors
    /// Returns [`SluiceError::StreamProcessingError`] if serialization fails.
    pub fn to_json_assoc(&self) -> Result<String> {
        serde_json::to_string(&Assoc::from_items(self.items()))
            .map_err(|e| SluiceError::stream_error(format!("serializing result: {e}")))
    }
}

impl Display for ResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_value(&self.value))
    }
}

pub(crate) struct Assoc {
    fields: Vec<(String, Value)>,
}

impl Assoc {
    pub(crate) fn from_items(items: Vec<Item>) -> Self {
        let mut fields: Vec<(String, Value)> = Vec::with_capacity(items.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for item in items {
            let name = item.key.to_string();
            match positions.get(&name) {
                Some(&position) => fields[position].1 = item.value,
                None => {
                    positions.insert(name.clone(), fields.len());
                    fields.push((name, item.value));
                }
            }
        }
        Self { fields }
    }

    pub(crate) fn push(&mut self, name: String, value: Value) {
        self.fields.push((name, value));
    }

    pub(crate) fn empty() -> Self {
        Self { fields: Vec::new() }
    }
}

impl Serialize for Assoc {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A lazily executed terminal operation.
///
/// The stream runs on the first access to the result; the result, or the
/// error that aborted the run, is cached for every later access.
#[derive(Clone)]
pub struct LastOperation {
    stream: Stream,
    result: ResultSlot,
}

impl LastOperation {
    pub(crate) fn new(stream: Stream, result: ResultSlot) -> Self {
        Self { stream, result }
    }

    /// Execute the stream if needed and return its result.
    ///
    /// # Errors
    /// Returns the error that aborted the run.
    pub fn result(&self) -> Result<ResultItem> {
        if let Some(result) = self.cached() {
            return Ok(result);
        }
        self.stream.settle()?;
        self.cached()
            .ok_or_else(|| SluiceError::stream_error("the stream finished without a result"))
    }

    fn cached(&self) -> Option<ResultItem> {
        self.result.lock().clone()
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn found(&self) -> Result<bool> {
        Ok(self.result()?.is_found())
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn not_found(&self) -> Result<bool> {
        Ok(self.result()?.is_not_found())
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn get(&self) -> Result<Value> {
        Ok(self.result()?.value)
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn key(&self) -> Result<Key> {
        Ok(self.result()?.key)
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn tuple(&self) -> Result<(Key, Value)> {
        Ok(self.result()?.tuple())
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        Ok(self.result()?.to_vec())
    }

    /// # Errors
    /// Returns the error that aborted the run.
    pub fn to_items(&self) -> Result<Vec<Item>> {
        Ok(self.result()?.items())
    }

    /// # Errors
    /// Returns the error that aborted the run or a serialization failure.
    pub fn to_json(&self) -> Result<String> {
        self.result()?.to_json()
    }

    /// # Errors
    /// Returns the error that aborted the run or a serialization failure.
    pub fn to_json_assoc(&self) -> Result<String> {
        self.result()?.to_json_assoc()
    }

    /// A new stream over the result's items.
    ///
    /// # Errors
    /// Returns the error that aborted the run.
    pub fn stream(&self) -> Result<Stream> {
        Ok(Stream::from_items(self.result()?.items()))
    }

    /// Release the underlying stream without running it.
    ///
    /// # Errors
    /// Returns [`SluiceError::ChainLocked`] while the stream is executing.
    pub fn destroy(self) -> Result<()> {
        self.stream.destroy()
    }

    pub(crate) const fn source(&self) -> &Stream {
        &self.stream
    }
}

impl fmt::Debug for LastOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastOperation")
            .field("stream", &self.stream)
            .field("result", &*self.result.lock())
            .finish()
    }
}
