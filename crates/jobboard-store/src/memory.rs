//! In-memory storage implementation.
//!
//! `MemoryStore` keeps documents in a map behind a lock. It validates
//! collections and ids exactly like [`RocksStore`](crate::RocksStore), and can
//! be switched into an unavailable or read-only state to exercise failure
//! handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::document::{self, Document};
use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema;
use crate::DocumentStore;

type Collections = HashMap<String, HashMap<String, Document>>;

/// In-memory document store.
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    available: AtomicBool,
    writable: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            writable: AtomicBool::new(true),
        }
    }

    /// Toggle availability. While unavailable, every operation fails with
    /// `StoreError::Unavailable` and nothing is read or written.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Toggle writes. While read-only, `set` and `update` fail with
    /// `StoreError::Unavailable` and reads keep working.
    pub fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::SeqCst);
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Whether a collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check(&self, collection: &str, id: &str) -> Result<()> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        if !schema::is_known(collection) {
            return Err(StoreError::UnknownCollection(collection.to_string()));
        }
        keys::document_key(id)?;
        Ok(())
    }

    fn check_write(&self, collection: &str, id: &str) -> Result<()> {
        self.check(collection, id)?;
        if !self.writable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store read-only".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check(collection, id)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        self.check_write(collection, id)?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        self.check_write(collection, id)?;
        let mut collections = self.collections.write();
        let current = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(StoreError::NotFound)?;
        document::apply_update(current, fields)
    }
}
