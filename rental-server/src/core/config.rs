use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/rental-server | Work directory (state, uploads, logs) |
/// | HTTP_PORT | 5000 | HTTP API port |
/// | SYNC_URL | (unset) | Upstream authority base URL; unset = local-only |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_TOKEN_TTL_HOURS | 24 | Admin bearer token lifetime |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/rental HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding state.json, admins.json, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Upstream authority for best-effort state/photo sync
    pub sync_url: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Admin bearer token lifetime in hours
    pub admin_token_ttl_hours: i64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/rental-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            sync_url: std::env::var("SYNC_URL").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_token_ttl_hours: std::env::var("ADMIN_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(24),
        }
    }

    /// Override the paths and port (test scenarios).
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// Directory for state.json and admins.json
    pub fn data_dir(&self) -> PathBuf {
        self.work_dir_path().join("data")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.work_dir_path().join("logs")
    }

    pub fn admin_token_ttl_ms(&self) -> i64 {
        self.admin_token_ttl_hours * 3_600_000
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
