//! MongoDB backed adapter tests.
//!
//! Run with `TEST_MONGODB_URI` pointing at a disposable server and
//! `cargo test -- --ignored`.

use appointment_service::services::{DocumentStore, MongoStore, StoreError};
use mongodb::bson::doc;

async fn store() -> MongoStore {
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("appointment_test_{}", uuid::Uuid::new_v4().simple());
    MongoStore::connect(&uri, &database)
        .await
        .expect("Failed to create MongoDB client")
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn insert_and_find_recent_newest_first() {
    let store = store().await;

    let mut ids = Vec::new();
    for seq in 0..3 {
        ids.push(
            store
                .insert("appointment", doc! { "seq": seq })
                .await
                .expect("insert failed"),
        );
    }

    let docs = store.find_recent("appointment", 2).await.expect("find failed");
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].get_object_id("_id").unwrap(), ids[2]);
    assert_eq!(docs[1].get_object_id("_id").unwrap(), ids[1]);
    assert!(docs[0].get_datetime("created_at").is_ok());

    if let Some(client) = store.client() {
        let _ = client
            .database(store.probe().await.database_name.as_deref().unwrap_or_default())
            .drop(None)
            .await;
    }
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn probe_reports_reachable_database() {
    let store = store().await;
    store.insert("appointment", doc! {}).await.expect("insert failed");

    let probe = store.probe().await;
    assert!(probe.client_initialized);
    assert!(probe.reachable);
    assert!(probe
        .collections
        .unwrap_or_default()
        .contains(&"appointment".to_string()));
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn find_recent_rejects_zero_limit() {
    let store = store().await;
    let result = store.find_recent("appointment", 0).await;
    assert!(matches!(result, Err(StoreError::Read(_))));
}
