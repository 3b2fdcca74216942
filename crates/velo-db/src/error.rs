//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::DataAccess ← Store trait boundary, source kept intact      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Engine caller (cart, checkout, UI backend)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use velo_core::{CoreError, ValidationError};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Loading the demo catalog into a database that already has it
    /// - Any UNIQUE / PRIMARY KEY violation
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Restocking an option that does not exist
    /// - Rule pairs referencing unknown options
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A row could not be turned into a domain value.
    ///
    /// ## When This Occurs
    /// - Unknown `adjustment_kind` on a pricing rule
    /// - Percentage outside the basis-point range
    #[error("Invalid {table} row {id}: {message}")]
    InvalidRow {
        table: &'static str,
        id: i64,
        message: String,
    },

    /// Caller input rejected before reaching SQLite.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
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

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Store trait boundary.
///
/// Input validation keeps its own variant; everything else is a data access
/// failure with the `DbError` kept as the source.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => CoreError::Validation(e),
            other => CoreError::data_access(other),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_db_error_becomes_data_access() {
        let core: CoreError = DbError::PoolExhausted.into();

        match &core {
            CoreError::DataAccess(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
        let source = core.source().expect("source kept");
        assert!(source.downcast_ref::<DbError>().is_some());
    }

    #[test]
    fn test_validation_error_keeps_its_variant() {
        let core: CoreError = DbError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();

        assert!(matches!(core, CoreError::Validation(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
    }
}
