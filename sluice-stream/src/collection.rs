// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::result::Assoc;
use crate::stream::Stream;
use serde_json::Value;
use sluice_core::{Item, Key};
use sluice_error::{Result, SluiceError};
use std::collections::HashMap;

/// Items grouped by label, in the order labels were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamCollection {
    groups: Vec<(Key, Vec<Item>)>,
    index: HashMap<Key, usize>,
}

impl StreamCollection {
    pub(crate) fn add(&mut self, label: Key, item: Item) {
        match self.index.get(&label) {
            Some(&position) => self.groups[position].1.push(item),
            None => {
                self.index.insert(label.clone(), self.groups.len());
                self.groups.push((label, vec![item]));
            }
        }
    }

    pub(crate) fn group_len(&self, label: &Key) -> usize {
        self.index
            .get(label)
            .map_or(0, |&position| self.groups[position].1.len())
    }

    /// A fresh stream over the group; empty for an unknown label.
    ///
    /// Every call returns a new stream, so a group can be replayed any number of times.
    pub fn get(&self, label: impl Into<Key>) -> Stream {
        Stream::from_items(self.items(label))
    }

    #[must_use]
    pub fn items(&self, label: impl Into<Key>) -> Vec<Item> {
        self.index
            .get(&label.into())
            .map(|&position| self.groups[position].1.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<Key> {
        self.groups.iter().map(|(label, _)| label.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `{"label": [values...], ...}` in label order.
    ///
    /// # Errors
    /// Returns [`SluiceError::StreamProcessingError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut assoc = Assoc::empty();
        for (label, items) in &self.groups {
            let values = items.iter().map(|item| item.value.clone()).collect();
            assoc.push(label.to_string(), Value::Array(values));
        }
        serde_json::to_string(&assoc)
            .map_err(|e| SluiceError::stream_error(format!("serializing groups: {e}")))
    }
}
