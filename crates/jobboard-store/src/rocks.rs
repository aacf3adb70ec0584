//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `DocumentStore` trait.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use crate::document::{self, Document};
use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::all_collections;
use crate::DocumentStore;

/// RocksDB-backed storage implementation.
///
/// Writes are serialized through `write_lock` so that a partial `update`
/// reads and writes back the document without another write in between.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let collections = all_collections();
        let cf_descriptors: Vec<_> = collections
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::debug!(
            path = %path.as_ref().display(),
            collections = collections.len(),
            "Opened document store"
        );

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get the column family handle backing a collection.
    fn cf(&self, collection: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))
    }

    /// Serialize a document using CBOR.
    fn serialize(document: &Document) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(document, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a document from CBOR.
    fn deserialize(data: &[u8]) -> Result<Document> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn read(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let cf = self.cf(collection)?;
        let key = keys::document_key(id)?;

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn write(&self, collection: &str, id: &str, document: &Document) -> Result<()> {
        let cf = self.cf(collection)?;
        let key = keys::document_key(id)?;
        let value = Self::serialize(document)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for RocksStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.read(collection, id)
    }

    async fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        let cf = self.cf(collection)?;
        let key = keys::document_key(id)?;

        let found = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(found.is_some())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write(collection, id, &document)
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut current = self.read(collection, id)?.ok_or(StoreError::NotFound)?;
        document::apply_update(&mut current, fields)?;
        self.write(collection, id, &current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::collection;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn document_crud() {
        let (store, _dir) = create_test_store();
        let account = doc(json!({
            "uid": "u1",
            "email": "test@example.com",
            "preferences": { "roleSelectionPreference": "ask" }
        }));

        // Create
        store
            .set(collection::UNIFIED_USER_ACCOUNTS, "u1", account.clone())
            .await
            .unwrap();

        // Read
        let retrieved = store
            .get(collection::UNIFIED_USER_ACCOUNTS, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved, account);

        // Update
        store
            .update(
                collection::UNIFIED_USER_ACCOUNTS,
                "u1",
                doc(json!({ "preferences.roleSelectionPreference": "company" })),
            )
            .await
            .unwrap();
        let updated = store
            .get(collection::UNIFIED_USER_ACCOUNTS, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            updated["preferences"]["roleSelectionPreference"],
            json!("company")
        );
        assert_eq!(updated["email"], json!("test@example.com"));
    }

    #[tokio::test]
    async fn set_overwrites_whole_document() {
        let (store, _dir) = create_test_store();
        store
            .set(
                collection::USER_SESSIONS,
                "u1",
                doc(json!({ "activeRole": "candidate", "extra": 1 })),
            )
            .await
            .unwrap();
        store
            .set(
                collection::USER_SESSIONS,
                "u1",
                doc(json!({ "activeRole": "company" })),
            )
            .await
            .unwrap();

        let session = store
            .get(collection::USER_SESSIONS, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session, doc(json!({ "activeRole": "company" })));
    }

    #[tokio::test]
    async fn exists_checks_only_presence() {
        let (store, _dir) = create_test_store();
        store
            .set(collection::CANDIDATES, "u1", Document::new())
            .await
            .unwrap();

        assert!(store.exists(collection::CANDIDATES, "u1").await.unwrap());
        assert!(!store.exists(collection::COMPANIES, "u1").await.unwrap());
        assert!(!store.exists(collection::CANDIDATES, "u2").await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_document() {
        let (store, _dir) = create_test_store();
        let result = store
            .update(
                collection::UNIFIED_USER_ACCOUNTS,
                "nobody",
                doc(json!({ "email": "x@example.com" })),
            )
            .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn unknown_collection() {
        let (store, _dir) = create_test_store();
        let result = store.get("jobs", "u1").await;
        assert!(matches!(result, Err(StoreError::UnknownCollection(_))));
    }

    #[tokio::test]
    async fn invalid_document_id() {
        let (store, _dir) = create_test_store();
        let result = store.get(collection::CANDIDATES, "a/b").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_keep_every_field() {
        const WRITERS: usize = 8;
        const ROUNDS: usize = 25;

        let (store, _dir) = create_test_store();
        let store = Arc::new(store);

        for round in 0..ROUNDS {
            let id = format!("u{round}");
            store
                .set(collection::UNIFIED_USER_ACCOUNTS, &id, doc(json!({ "uid": id })))
                .await
                .unwrap();

            let tasks: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let store = Arc::clone(&store);
                    let id = id.clone();
                    let mut fields = Document::new();
                    fields.insert(format!("fields.f{i}"), json!(i));
                    tokio::spawn(async move {
                        store
                            .update(collection::UNIFIED_USER_ACCOUNTS, &id, fields)
                            .await
                    })
                })
                .collect();
            for task in tasks {
                task.await.unwrap().unwrap();
            }

            let account = store
                .get(collection::UNIFIED_USER_ACCOUNTS, &id)
                .await
                .unwrap()
                .unwrap();
            let fields = account["fields"].as_object().unwrap();
            assert_eq!(fields.len(), WRITERS, "round {round} lost an update");
            assert_eq!(account["uid"], json!(id));
        }
    }

    #[tokio::test]
    async fn reopen_keeps_documents() {
        let dir = TempDir::new().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            store
                .set(collection::COMPANIES, "u1", doc(json!({ "name": "Acme" })))
                .await
                .unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        let company = store
            .get(collection::COMPANIES, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(company["name"], json!("Acme"));
    }
}
