//! Human readable connectivity snapshot for `GET /test`.

use serde::Serialize;
use std::sync::Arc;

use crate::config::{DATABASE_NAME_VAR, DATABASE_URL_VAR};
use crate::services::store::{DocumentStore, StoreProbe};

const ERROR_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

type EnvCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Combines a store probe with the process environment. Recomputed on every
/// call; nothing is cached.
#[derive(Clone)]
pub struct DiagnosticsReporter {
    store: Arc<dyn DocumentStore>,
    env_is_set: EnvCheck,
}

impl DiagnosticsReporter {
    /// Reads the real process environment.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_env(store, |key| {
            std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
        })
    }

    pub fn with_env<F>(store: Arc<dyn DocumentStore>, env_is_set: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            store,
            env_is_set: Arc::new(env_is_set),
        }
    }

    pub async fn report(&self) -> DiagnosticsReport {
        let probe = self.store.probe().await;
        let (database, connection_status) = describe(&probe);

        DiagnosticsReport {
            backend: "✅ Running".to_string(),
            database,
            database_url: set_marker((self.env_is_set)(DATABASE_URL_VAR)),
            database_name: set_marker((self.env_is_set)(DATABASE_NAME_VAR)),
            connection_status: connection_status.to_string(),
            collections: probe.collections.unwrap_or_default(),
        }
    }
}

fn describe(probe: &StoreProbe) -> (String, &'static str) {
    if !probe.client_initialized {
        return ("⚠️  Available but not initialized".to_string(), "Not Connected");
    }

    let excerpt = || {
        probe
            .error
            .as_deref()
            .unwrap_or("unknown error")
            .chars()
            .take(ERROR_EXCERPT_CHARS)
            .collect::<String>()
    };

    if !probe.reachable {
        return (format!("❌ Error: {}", excerpt()), "Not Connected");
    }

    match probe.collections {
        Some(_) => ("✅ Connected & Working".to_string(), "Connected"),
        None => (format!("⚠️  Connected but Error: {}", excerpt()), "Connected"),
    }
}

fn set_marker(is_set: bool) -> String {
    let marker = if is_set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}
