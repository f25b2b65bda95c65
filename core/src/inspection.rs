//! Content inspection of captured response bodies.
//!
//! # Design
//! After each exchange the context can forward the raw body to a
//! `ContentInspector`, typically a JSON store that later JSON steps read
//! from. `JsonStorage` is cheap to clone and every clone shares the same
//! document, so the REST context and the JSON steps can each hold one.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::debug;

use crate::error::InspectionError;

/// Receives the raw body of every captured response.
pub trait ContentInspector {
    /// Parse or validate `body`. An error fails the current step.
    fn write_raw_content(&mut self, body: &[u8]) -> Result<(), InspectionError>;
}

/// Keeps the last response body parsed as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonStorage {
    document: Arc<Mutex<Option<Value>>>,
}

impl JsonStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently stored document, if any.
    pub fn read_json(&self) -> Option<Value> {
        self.lock().clone()
    }

    /// Look up a node by JSON pointer (`/items/0/name`).
    pub fn read_pointer(&self, pointer: &str) -> Option<Value> {
        self.lock().as_ref()?.pointer(pointer).cloned()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Value>> {
        // A panic while holding the lock cannot leave a half-written Value.
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ContentInspector for JsonStorage {
    /// An empty body (204, HEAD) clears the document. A body that is not
    /// JSON clears it too, and fails.
    fn write_raw_content(&mut self, body: &[u8]) -> Result<(), InspectionError> {
        let mut doc = self.lock();
        if body.iter().all(u8::is_ascii_whitespace) {
            *doc = None;
            return Ok(());
        }
        match serde_json::from_slice(body) {
            Ok(value) => {
                debug!(bytes = body.len(), "stored JSON response body");
                *doc = Some(value);
                Ok(())
            }
            Err(e) => {
                *doc = None;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stores_parsed_document_shared_across_clones() {
        let storage = JsonStorage::new();
        let mut writer = storage.clone();
        writer.write_raw_content(br#"{"id":42,"tags":["a","b"]}"#).unwrap();
        assert_eq!(storage.read_json(), Some(json!({"id": 42, "tags": ["a", "b"]})));
        assert_eq!(storage.read_pointer("/tags/1"), Some(json!("b")));
        assert_eq!(storage.read_pointer("/missing"), None);
    }

    #[test]
    fn malformed_body_is_rejected_and_clears_document() {
        let mut storage = JsonStorage::new();
        storage.write_raw_content(b"[1]").unwrap();
        let err = storage.write_raw_content(b"<html>").unwrap_err();
        assert!(matches!(err, InspectionError::MalformedJson(_)));
        assert_eq!(storage.read_json(), None);
    }

    #[test]
    fn empty_body_clears_without_error() {
        let mut storage = JsonStorage::new();
        storage.write_raw_content(b"{}").unwrap();
        storage.write_raw_content(b"").unwrap();
        assert!(storage.read_json().is_none());
    }

    #[test]
    fn clear_drops_document() {
        let mut storage = JsonStorage::new();
        storage.write_raw_content(b"true").unwrap();
        storage.clear();
        assert!(storage.read_json().is_none());
    }
}
