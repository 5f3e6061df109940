use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Database,
};
use service_core::error::AppError;

use super::{
    check_limit, prepare_for_insert, DocumentStore, StoreError, StoreProbe, PROBE_COLLECTION_SAMPLE,
};

/// MongoDB backed store.
///
/// The handle is created once by the composition root and shared read-only.
/// There is no reconnect loop: the driver's own server selection is the only
/// recovery, so a store built with [`MongoStore::disconnected`] stays that way
/// until restart.
#[derive(Clone)]
pub struct MongoStore {
    handle: Option<MongoHandle>,
}

#[derive(Clone)]
struct MongoHandle {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("appointment-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client initialized");

        Ok(Self {
            handle: Some(MongoHandle { client, db }),
        })
    }

    /// A store with no client; every operation reports `Unavailable`.
    pub fn disconnected() -> Self {
        Self { handle: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    pub fn client(&self) -> Option<&MongoClient> {
        self.handle.as_ref().map(|h| &h.client)
    }

    fn database(&self) -> Result<&Database, StoreError> {
        self.handle
            .as_ref()
            .map(|h| &h.db)
            .ok_or(StoreError::Unavailable)
    }
}

/// Newest first. `_id` alone only orders writes from one process within one
/// second, so the write stamp leads and `_id` breaks ties.
fn recent_first() -> Document {
    doc! { "created_at": -1, "_id": -1 }
}

fn is_connectivity_error(err: &MongoError) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. }
    )
}

fn write_error(collection: &str, err: MongoError) -> StoreError {
    tracing::error!(collection = %collection, error = %err, "Failed to insert document");
    if is_connectivity_error(&err) {
        StoreError::Unavailable
    } else {
        StoreError::Write(err.to_string())
    }
}

fn read_error(collection: &str, err: MongoError) -> StoreError {
    tracing::error!(collection = %collection, error = %err, "Failed to read documents");
    if is_connectivity_error(&err) {
        StoreError::Unavailable
    } else {
        StoreError::Read(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<ObjectId, StoreError> {
        let db = self.database()?;
        prepare_for_insert(&mut document);

        let result = db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| write_error(collection, e))?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Write(format!(
                "unexpected identifier type returned: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_recent(&self, collection: &str, limit: i64) -> Result<Vec<Document>, StoreError> {
        check_limit(limit)?;
        let db = self.database()?;

        let options = FindOptions::builder()
            .sort(recent_first())
            .limit(limit)
            .build();

        let cursor = db
            .collection::<Document>(collection)
            .find(doc! {}, options)
            .await
            .map_err(|e| read_error(collection, e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| read_error(collection, e))
    }

    async fn probe(&self) -> StoreProbe {
        let Some(handle) = &self.handle else {
            return StoreProbe::default();
        };

        let mut probe = StoreProbe {
            client_initialized: true,
            database_name: Some(handle.db.name().to_string()),
            ..StoreProbe::default()
        };

        if let Err(e) = handle.db.run_command(doc! { "ping": 1 }, None).await {
            tracing::warn!(error = %e, "MongoDB ping failed");
            probe.error = Some(e.to_string());
            return probe;
        }
        probe.reachable = true;

        match handle.db.list_collection_names(None).await {
            Ok(mut names) => {
                names.truncate(PROBE_COLLECTION_SAMPLE);
                probe.collections = Some(names);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list MongoDB collections");
                probe.error = Some(e.to_string());
            }
        }

        probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disconnected_store_reports_unavailable() {
        let store = MongoStore::disconnected();
        assert!(!store.is_initialized());

        let insert = store.insert("appointment", doc! { "name": "Ani" }).await;
        assert!(matches!(insert, Err(StoreError::Unavailable)));

        let find = store.find_recent("appointment", 10).await;
        assert!(matches!(find, Err(StoreError::Unavailable)));
    }

    #[tokio::test]
    async fn disconnected_probe_does_not_fail() {
        let probe = MongoStore::disconnected().probe().await;
        assert_eq!(probe, StoreProbe::default());
    }

    #[test]
    fn recent_first_sorts_by_write_stamp_then_id() {
        let sort = recent_first();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["created_at", "_id"]);
        assert_eq!(sort.get_i32("created_at").unwrap(), -1);
        assert_eq!(sort.get_i32("_id").unwrap(), -1);
    }

    #[tokio::test]
    async fn unreachable_server_reports_unavailable() {
        let store = MongoStore::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
            "clinic_test",
        )
        .await
        .expect("client construction does not contact the server");
        assert!(store.is_initialized());

        let insert = store.insert("appointment", doc! { "name": "Ani" }).await;
        assert!(matches!(insert, Err(StoreError::Unavailable)));

        let find = store.find_recent("appointment", 10).await;
        assert!(matches!(find, Err(StoreError::Unavailable)));

        let probe = store.probe().await;
        assert!(probe.client_initialized);
        assert!(!probe.reachable);
        assert_eq!(probe.database_name.as_deref(), Some("clinic_test"));
        assert!(probe.collections.is_none());
        assert!(probe.error.is_some());
    }

    #[tokio::test]
    async fn find_recent_checks_limit_before_connection() {
        let result = MongoStore::disconnected().find_recent("appointment", 0).await;
        assert!(matches!(result, Err(StoreError::Read(_))));
    }
}
