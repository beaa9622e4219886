use std::path::PathBuf;

use chirpy_core::moderation::DEFAULT_BANNED_WORDS;

use crate::auth::jwt::JwtConfig;

/// Which [`chirpy_db::Store`] implementation backs the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL at the given connection URL.
    Postgres { database_url: String },
    /// In-process store; all data is lost on restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret (and the database URL when using
/// Postgres) have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Deployment platform. Only `"dev"` enables the admin reset endpoint.
    pub platform: String,
    pub store: StoreBackend,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory served under `/app` (default: current directory).
    pub fileserver_root: PathBuf,
    /// Words masked in chirp bodies.
    pub banned_words: Vec<String>,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `8080`                         |
    /// | `PLATFORM`             | `prod`                         |
    /// | `STORE`                | `postgres`                     |
    /// | `DATABASE_URL`         | falls back to `DB_URL`         |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `FILESERVER_ROOT`      | `.`                            |
    /// | `BANNED_WORDS`         | `kerfuffle,sharbert,fornax`    |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, on an unknown `STORE`, or when the
    /// Postgres backend is selected without a database URL.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let platform = std::env::var("PLATFORM").unwrap_or_else(|_| "prod".into());

        let store = match std::env::var("STORE")
            .unwrap_or_else(|_| "postgres".into())
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => {
                let database_url = std::env::var("DATABASE_URL")
                    .or_else(|_| std::env::var("DB_URL"))
                    .expect("DATABASE_URL (or DB_URL) must be set when STORE=postgres");
                StoreBackend::Postgres { database_url }
            }
            other => panic!("STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        let cors_origins = split_csv(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:8080".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fileserver_root =
            PathBuf::from(std::env::var("FILESERVER_ROOT").unwrap_or_else(|_| ".".into()));

        let banned_words = std::env::var("BANNED_WORDS")
            .map(|v| split_csv(&v))
            .unwrap_or_else(|_| DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            platform,
            store,
            cors_origins,
            request_timeout_secs,
            fileserver_root,
            banned_words,
            jwt,
        }
    }

    /// Whether destructive admin operations are allowed.
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
