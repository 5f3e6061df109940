//! Shared helpers for appointment-service integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`, backed
//! by `MemoryStore` unless a test supplies its own store.

#![allow(dead_code)]

use appointment_service::config::AppointmentConfig;
use appointment_service::services::{DiagnosticsReporter, DocumentStore, MemoryStore};
use appointment_service::startup::{build_router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn spawn() -> Self {
        let store = MemoryStore::new("clinic_test");
        let router = build_router(AppState::new(
            AppointmentConfig::default(),
            Arc::new(store.clone()),
        ));
        Self { router, store }
    }

    /// Router over an arbitrary store with a fixed view of the environment.
    pub fn router_with_store<F>(store: Arc<dyn DocumentStore>, env_is_set: F) -> Router
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let state = AppState::new(AppointmentConfig::default(), store.clone())
            .with_diagnostics(DiagnosticsReporter::with_env(store, env_is_set));
        build_router(state)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(body.to_string())).await
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

pub fn appointment(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "phone": "0811",
        "service": "botox",
        "preferred_date": "2024-05-01"
    })
}
