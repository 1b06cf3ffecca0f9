use std::path::PathBuf;

/// Portal configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory holding the database and logs |
/// | DB_FILE | portal.redb | Database file name inside WORK_DIR |
/// | LOG_LEVEL | warn | tracing level |
/// | LOG_DIR | (unset) | Write daily log files here instead of stderr |
/// | TOAST_TTL_MS | 3000 | Notification lifetime |
/// | STRICT_ADMIN_ROUTES | false | Require the Admin role on admin pages |
/// | ARGON2_MEMORY_KIB | 19456 | argon2 memory cost |
/// | ARGON2_ITERATIONS | 2 | argon2 time cost |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/portal STRICT_ADMIN_ROUTES=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// Database file name, relative to `work_dir`
    pub db_file: String,
    /// Log level filter
    pub log_level: String,
    /// Optional log directory
    pub log_dir: Option<String>,
    /// How long a toast stays visible (milliseconds)
    pub toast_ttl_ms: u64,
    /// When set, admin pages need an Admin session, not just any session
    pub strict_admin_routes: bool,
    /// argon2 memory cost in KiB
    pub argon2_memory_kib: u32,
    /// argon2 iterations
    pub argon2_iterations: u32,
    /// Runtime environment: development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            db_file: std::env::var("DB_FILE").unwrap_or_else(|_| "portal.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            toast_ttl_ms: std::env::var("TOAST_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            strict_admin_routes: std::env::var("STRICT_ADMIN_ROUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            argon2_memory_kib: std::env::var("ARGON2_MEMORY_KIB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(argon2::Params::DEFAULT_M_COST),
            argon2_iterations: std::env::var("ARGON2_ITERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(argon2::Params::DEFAULT_T_COST),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the working directory, keeping everything else
    ///
    /// Used by the `--work-dir` flag.
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Fixed configuration for tests; the environment is never read
    pub fn for_test(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            db_file: "portal.redb".into(),
            log_level: "warn".into(),
            log_dir: None,
            toast_ttl_ms: 3000,
            strict_admin_routes: false,
            argon2_memory_kib: argon2::Params::DEFAULT_M_COST,
            argon2_iterations: argon2::Params::DEFAULT_T_COST,
            environment: "test".into(),
        }
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_joins_work_dir() {
        let mut config = Config::for_test("/tmp/portal-test");
        config.db_file = "x.redb".into();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/portal-test/x.redb"));
    }

    #[test]
    fn test_for_test_uses_fixed_values() {
        let config = Config::for_test("/tmp/portal-test");
        assert_eq!(config.work_dir, "/tmp/portal-test");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/portal-test/portal.redb"));
        assert_eq!(config.toast_ttl_ms, 3000);
        assert!(!config.strict_admin_routes);
        assert!(config.log_dir.is_none());
        assert_eq!(config.environment, "test");
    }
}
