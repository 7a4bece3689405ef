//! In-memory DocumentStore implementation for tests and offline play.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{ensure_object, rank_by_field, validate_key};
use super::{DocumentStore, Result, StoreError};

type Collections = HashMap<String, HashMap<String, Value>>;

/// In-memory implementation of DocumentStore.
///
/// Can be switched offline to exercise the paths where the backend is
/// unreachable.
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
    available: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of documents stored in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|collections| collections.get(collection).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<()> {
        self.check_available()?;
        validate_key(key)?;
        ensure_object(collection, key, &document)?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(key.to_owned(), document);
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        self.check_available()?;
        validate_key(key)?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(key))
            .cloned())
    }

    async fn top_n(&self, collection: &str, sort_field: &str, n: usize) -> Result<Vec<Value>> {
        self.check_available()?;
        let documents: Vec<Value> = {
            let collections = self
                .collections
                .read()
                .map_err(|_| StoreError::LockPoisoned)?;
            collections
                .get(collection)
                .map(|documents| documents.values().cloned().collect())
                .unwrap_or_default()
        };
        Ok(rank_by_field(documents, sort_field, n))
    }
}
