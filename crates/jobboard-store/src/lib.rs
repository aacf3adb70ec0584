//! Document storage layer for jobboard.
//!
//! This crate provides a small key-value document store keyed by collection name
//! and document id, with two backends:
//!
//! - [`RocksStore`]: persistent, one `RocksDB` column family per collection,
//!   CBOR-encoded documents
//! - [`MemoryStore`]: in-process, used by tests and local runs
//!
//! # Collections
//!
//! - `candidates`: candidate profiles (existence only)
//! - `companies`: company profiles (existence only)
//! - `userSessions`: one role session per user
//! - `unifiedUserAccounts`: the account record with role preferences
//!
//! # Example
//!
//! ```no_run
//! use jobboard_store::{schema::collection, DocumentStore, RocksStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RocksStore::open("/tmp/jobboard-db")?;
//!
//! let has_profile = store.exists(collection::CANDIDATES, "u1").await?;
//! println!("candidate profile present: {has_profile}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod document;
pub mod error;
pub mod keys;
pub mod memory;
pub mod rocks;
pub mod schema;

pub use document::{from_document, to_document, Document};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use rocks::RocksStore;

use async_trait::async_trait;

/// The storage trait defining all document operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Get a document by collection and id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Whether a document exists. No field is inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. A failure is never
    /// reported as "does not exist".
    async fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        Ok(self.get(collection, id).await?.is_some())
    }

    /// Write a whole document, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Partially update an existing document.
    ///
    /// Keys of `fields` are field paths (see [`keys::field_path`]).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document doesn't exist.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()>;
}
