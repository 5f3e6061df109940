//! Document store adapter.
//!
//! [`DocumentStore`] is a minimal, collection-agnostic interface: insert one
//! document, fetch the most recent N, and probe connectivity. Typed access
//! goes through [`DocumentStoreExt`], which encodes and decodes records at
//! this boundary so untyped documents never travel further up.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, DateTime, Document};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Result count used when a caller does not ask for one.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound on collection names reported by [`DocumentStore::probe`].
pub const PROBE_COLLECTION_SAMPLE: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not available")]
    Unavailable,

    #[error("Failed to write document: {0}")]
    Write(String),

    #[error("Failed to read documents: {0}")]
    Read(String),
}

/// Connectivity snapshot. Every field degrades independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreProbe {
    /// A client handle exists.
    pub client_initialized: bool,
    /// The target database answered a ping.
    pub reachable: bool,
    pub database_name: Option<String>,
    /// `None` when the names could not be listed.
    pub collections: Option<Vec<String>>,
    /// First failure met while probing.
    pub error: Option<String>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `document` and returns the identifier the store assigned.
    ///
    /// Any caller supplied `_id` is discarded. `created_at` and `updated_at`
    /// are stamped with the current time.
    async fn insert(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError>;

    /// Up to `limit` documents, newest first by insertion order.
    async fn find_recent(&self, collection: &str, limit: i64) -> Result<Vec<Document>, StoreError>;

    /// Never fails; problems are reported inside the snapshot.
    async fn probe(&self) -> StoreProbe;
}

#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    async fn insert_record<T>(&self, collection: &str, record: &T) -> Result<ObjectId, StoreError>
    where
        T: Serialize + Sync,
    {
        let document = bson::to_document(record).map_err(|e| StoreError::Write(e.to_string()))?;
        self.insert(collection, document).await
    }

    async fn find_recent_records<T>(&self, collection: &str, limit: i64) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned + Send,
    {
        self.find_recent(collection, limit)
            .await?
            .into_iter()
            .map(|document| {
                bson::from_document(document).map_err(|e| {
                    tracing::error!(collection = %collection, error = %e, "Failed to decode stored document");
                    StoreError::Read(format!("invalid document in '{}': {}", collection, e))
                })
            })
            .collect()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

pub(crate) fn check_limit(limit: i64) -> Result<(), StoreError> {
    if limit < 1 {
        return Err(StoreError::Read(format!(
            "limit must be a positive integer, got {}",
            limit
        )));
    }
    Ok(())
}

/// Drops any caller supplied `_id` and stamps write timestamps.
pub(crate) fn prepare_for_insert(document: &mut Document) {
    document.remove("_id");
    let now = DateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);
}
