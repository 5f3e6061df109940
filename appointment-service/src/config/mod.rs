use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Environment variable holding the document store address.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the database name.
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

#[derive(Debug, Clone)]
pub struct AppointmentConfig {
    pub common: core_config::Config,
    pub store_backend: StoreBackend,
    /// `None` when the store is not configured; the service then runs degraded.
    pub database: Option<DatabaseConfig>,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Mongo,
    /// Process-local, lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl AppointmentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let url = get_env(DATABASE_URL_VAR, is_prod)?;
        let name = get_env(DATABASE_NAME_VAR, is_prod)?;
        let database = match (url, name) {
            (Some(url), Some(name)) => Some(DatabaseConfig {
                url: Secret::new(url),
                name,
            }),
            _ => None,
        };

        let store_backend = get_env("STORE_BACKEND", false)?
            .map(|v| v.parse::<StoreBackend>())
            .transpose()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?
            .unwrap_or_default();

        Ok(AppointmentConfig {
            common: common_config,
            store_backend,
            database,
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| parse_origins(&v))
                    .unwrap_or_default(),
            },
        })
    }
}

impl Default for AppointmentConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            store_backend: StoreBackend::default(),
            database: None,
            cors: CorsConfig::default(),
        }
    }
}

/// Splits a comma separated origin list; `*` alone means any origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_string)
        .collect()
}

/// Empty values count as unset.
fn get_env(key: &str, required: bool) -> Result<Option<String>, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(Some(val)),
        _ if required => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        _ => Ok(None),
    }
}
