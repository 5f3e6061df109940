use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    check_limit, prepare_for_insert, DocumentStore, StoreError, StoreProbe, PROBE_COLLECTION_SAMPLE,
};

/// In-process store with the same contract as [`super::MongoStore`].
///
/// Backs `STORE_BACKEND=memory` and the tests. Clones share the same data.
#[derive(Clone)]
pub struct MemoryStore {
    name: String,
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    collections: BTreeMap<String, Vec<Document>>,
    inserts: u64,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    /// Number of successful inserts across all collections.
    pub async fn insert_count(&self) -> u64 {
        self.state.read().await.inserts
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.state
            .read()
            .await
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<ObjectId, StoreError> {
        prepare_for_insert(&mut document);
        let id = ObjectId::new();
        document.insert("_id", id);

        let mut state = self.state.write().await;
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        state.inserts += 1;

        Ok(id)
    }

    async fn find_recent(&self, collection: &str, limit: i64) -> Result<Vec<Document>, StoreError> {
        check_limit(limit)?;
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        let state = self.state.read().await;
        Ok(state
            .collections
            .get(collection)
            .map(|docs| docs.iter().rev().take(take).cloned().collect())
            .unwrap_or_default())
    }

    async fn probe(&self) -> StoreProbe {
        let state = self.state.read().await;
        StoreProbe {
            client_initialized: true,
            reachable: true,
            database_name: Some(self.name.clone()),
            collections: Some(
                state
                    .collections
                    .keys()
                    .take(PROBE_COLLECTION_SAMPLE)
                    .cloned()
                    .collect(),
            ),
            error: None,
        }
    }
}
