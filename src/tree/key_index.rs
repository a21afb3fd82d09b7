//! Reverse mapping from generated node keys to property paths.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{ProptreeError, Result};

/// Key to path mapping produced while a [`PropertyTree`](super::PropertyTree)
/// is built.
///
/// A UI tree widget reports the key of the selected node; the index turns it
/// back into the `a --> b` path the data layer filters on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyIndex {
    entries: BTreeMap<String, String>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, path: String) {
        self.entries.insert(key, path);
    }

    /// Path recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get) but reports a missing key as
    /// [`ProptreeError::UnknownKey`].
    pub fn resolve(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| ProptreeError::UnknownKey {
            key: key.to_string(),
        })
    }

    /// First key (in key order) whose recorded path equals `path`.
    pub fn key_for(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(k, _)| k.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_str()))
    }
}
