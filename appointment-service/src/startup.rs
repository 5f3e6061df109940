//! Application startup and lifecycle management.

use axum::{
    http::{HeaderValue, Request},
    middleware::from_fn,
    routing::get,
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppointmentConfig, CorsConfig, StoreBackend};
use crate::handlers;
use crate::services::{
    AppointmentService, DiagnosticsReporter, DocumentStore, MemoryStore, MongoStore,
};

/// Shared application state. The store handle is built once and only ever
/// read by handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppointmentConfig,
    pub store: Arc<dyn DocumentStore>,
    pub appointments: AppointmentService,
    pub diagnostics: DiagnosticsReporter,
}

impl AppState {
    pub fn new(config: AppointmentConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            appointments: AppointmentService::new(store.clone()),
            diagnostics: DiagnosticsReporter::new(store.clone()),
            store,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsReporter) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Builds the configured store. For MongoDB, falls back to a disconnected
/// store so the API still starts and `/test` can explain what is wrong.
pub async fn connect_store(config: &AppointmentConfig) -> Arc<dyn DocumentStore> {
    if config.store_backend == StoreBackend::Memory {
        tracing::warn!("Using in-memory store, appointments will not survive a restart");
        return Arc::new(MemoryStore::new("memory"));
    }

    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set, starting without a database");
        return Arc::new(MongoStore::disconnected());
    };

    match MongoStore::connect(database.url.expose_secret(), &database.name).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Database unavailable, starting in degraded mode");
            Arc::new(MongoStore::disconnected())
        }
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    layer.allow_origin(
        config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>(),
    )
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/api/services", get(handlers::list_services))
        .route("/api/info", get(handlers::clinic_info))
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/test", get(handlers::test_database))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            make_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: AppointmentConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await;
        Self::build_with_store(config, store).await
    }

    /// Port 0 binds a random port, which tests rely on.
    pub async fn build_with_store(
        config: AppointmentConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(config, store));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Appointment service listening on port {}", self.port);
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_store_without_database_is_disconnected() {
        let store = connect_store(&AppointmentConfig::default()).await;
        let probe = store.probe().await;
        assert!(!probe.client_initialized);
        assert!(!probe.reachable);
    }

    #[tokio::test]
    async fn connect_store_honours_memory_backend() {
        let config = AppointmentConfig {
            store_backend: StoreBackend::Memory,
            ..AppointmentConfig::default()
        };
        let probe = connect_store(&config).await.probe().await;
        assert!(probe.reachable);
        assert_eq!(probe.database_name.as_deref(), Some("memory"));
    }

    #[tokio::test]
    async fn application_binds_random_port() {
        let config = AppointmentConfig {
            common: service_core::config::Config { port: 0 },
            ..AppointmentConfig::default()
        };
        let app = Application::build_with_store(config, Arc::new(MemoryStore::default()))
            .await
            .expect("Failed to build application");
        assert_ne!(app.port(), 0);
    }
}
