//! # Database Error Types
//!
//! Error types for database operations and their mapping into the
//! storage-agnostic [`StoreError`] the core port expects.
//!
//! ## Error Flow
//! ```text
//! sqlx::Error ──► DbError (this module) ──► kardex_core::StoreError
//! ```

use thiserror::Error;

use kardex_core::StoreError;

/// Database operation errors.
///
/// These wrap sqlx errors and classify the constraint violations the
/// application cares about.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (e.g. duplicate product name).
    #[error("duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures only through the error message, so
/// the message is parsed:
/// `"UNIQUE constraint failed: <table>.<column>"` and
/// `"FOREIGN KEY constraint failed"`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("connection pool exhausted".to_string())
            }

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Lift database errors through the core port boundary.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StoreError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => StoreError::AlreadyExists {
                entity: field,
                value,
            },
            other => StoreError::Storage(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
