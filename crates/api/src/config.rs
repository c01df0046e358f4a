use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use inka_core::auth::token::{parse_algorithm, TokenConfig, DEFAULT_ACCESS_EXPIRY_MINS};

/// Default minimum password length for newly created users.
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Which storage backend serves users and products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local maps; data is lost on restart.
    Memory,
    /// PostgreSQL at the given connection string.
    Postgres { database_url: String },
}

impl StoreBackend {
    /// Short name for logs and the health endpoint (never includes credentials).
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres { .. } => "postgres",
        }
    }
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Minimum accepted password length on user creation (default: `8`).
    pub min_password_length: usize,
    /// Storage backend (default: in-memory).
    pub store: StoreBackend,
    /// Log output format (default: text).
    pub log_format: LogFormat,
    /// Token signing configuration (secret, algorithm, lifetime).
    pub jwt: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `MIN_PASSWORD_LENGTH`    | `8`                     |
    /// | `STORE_BACKEND`          | `memory`                |
    /// | `DATABASE_URL`           | required for `postgres` |
    /// | `LOG_FORMAT`             | `text`                  |
    /// | `JWT_SECRET`             | **required**            |
    /// | `JWT_ALGORITHM`          | `HS256`                 |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `10`                    |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let min_password_length: usize = var(
            "MIN_PASSWORD_LENGTH",
            &DEFAULT_MIN_PASSWORD_LENGTH.to_string(),
        )
        .parse()
        .context("MIN_PASSWORD_LENGTH must be a valid usize")?;

        let store = match var("STORE_BACKEND", "memory").to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|s| !s.is_empty())
                    .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?,
            },
            other => bail!("STORE_BACKEND must be 'memory' or 'postgres', got '{other}'"),
        };

        let log_format = match var("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => bail!("LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        };

        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set in the environment")?;
        if secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let algorithm = parse_algorithm(&var("JWT_ALGORITHM", "HS256"))?;

        let expiry_mins: i64 = var(
            "JWT_ACCESS_EXPIRY_MINS",
            &DEFAULT_ACCESS_EXPIRY_MINS.to_string(),
        )
        .parse()
        .context("JWT_ACCESS_EXPIRY_MINS must be a valid i64")?;
        if expiry_mins <= 0 {
            bail!("JWT_ACCESS_EXPIRY_MINS must be positive, got {expiry_mins}");
        }
        let default_ttl = Duration::try_minutes(expiry_mins)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .context("JWT_ACCESS_EXPIRY_MINS is too large")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            min_password_length,
            store,
            log_format,
            jwt: TokenConfig {
                secret,
                algorithm,
                default_ttl,
            },
        })
    }
}
