use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on closing pooled connections at shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Pool size (default: `20`).
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | required                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables or unparsable values, so that
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| routewise_db::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            db_max_connections,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

/// Which object store implementation to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    /// Process-local; contents are lost on restart.
    Memory,
}

/// Object store configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible servers such as MinIO.
    pub endpoint_url: Option<String>,
    /// Bound on each object-store call, in seconds.
    pub timeout_secs: u64,
}

/// Bucket name reported by the memory backend when none is configured.
const DEFAULT_MEMORY_BUCKET: &str = "routewise-local";

impl StorageConfig {
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`      | `s3` (`s3` or `memory`)          |
    /// | `S3_BUCKET_NAME`       | required for `s3`                |
    /// | `AWS_REGION`           | AWS default chain                |
    /// | `S3_ENDPOINT_URL`      | unset                            |
    /// | `STORAGE_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Self {
        let backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3,
            "memory" => StorageBackend::Memory,
            other => panic!("STORAGE_BACKEND must be 's3' or 'memory', got '{other}'"),
        };

        let bucket = match backend {
            StorageBackend::S3 => {
                std::env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME must be set for the s3 backend")
            }
            StorageBackend::Memory => std::env::var("S3_BUCKET_NAME")
                .unwrap_or_else(|_| DEFAULT_MEMORY_BUCKET.into()),
        };

        let timeout_secs: u64 = std::env::var("STORAGE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STORAGE_TIMEOUT_SECS must be a valid u64");

        Self {
            backend,
            bucket,
            region: non_empty_var("AWS_REGION"),
            endpoint_url: non_empty_var("S3_ENDPOINT_URL"),
            timeout_secs,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
