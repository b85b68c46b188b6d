//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! File databases run in WAL journal mode with NORMAL synchronous, and
//! foreign key enforcement is switched on for every connection - the
//! movement ledger relies on `ON DELETE CASCADE`.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::store::SqliteLedgerStore;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use kardex_db::DbConfig;
///
/// let config = DbConfig::new("./kardex.db").max_connections(2);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-user tool)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// A single connection: every pooled connection would otherwise get
    /// its own private in-memory database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(":memory:")
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing access to the ledger store.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// Creates the database file if missing, configures the connection
    /// pragmas, builds the pool and runs migrations (unless disabled).
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "initializing database connection"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                // WAL mode: readers don't block the writer
                .journal_mode(SqliteJournalMode::Wal)
        };

        let connect_options = connect_options
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off; the movements cascade
            // depends on them
            .foreign_keys(true);

        debug!("connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent; also called by `new()` when
    /// `run_migrations` is enabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool, for queries not covered
    /// by the ledger store.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the ledger store backed by this pool.
    pub fn ledger(&self) -> SqliteLedgerStore {
        SqliteLedgerStore::new(self.pool.clone())
    }

    /// Closes the database connection pool. After this, all store
    /// operations will fail.
    pub async fn close(&self) {
        info!("closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kardex.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Already ran on connect; a second run must be a no-op.
        db.run_migrations().await.unwrap();
        assert!(db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_in_memory_config_uses_single_connection() {
        let config = DbConfig::in_memory();
        assert_eq!(config.max_connections, 1);
    }
}
