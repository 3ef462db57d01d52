//! Typed error enum for the storage layer.
//!
//! Distinguishes "could not reach the database" from "the database rejected
//! the statement", since callers treat the two differently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection could not be established (unreachable host, bad credentials).
    #[error("Connection failed: {}", db_message(.0))]
    Connection(#[source] sqlx::Error),

    /// Statement preparation or execution failed.
    #[error("Execute failed: {}", db_message(.0))]
    Query(#[source] sqlx::Error),

    /// Row data could not be mapped into a `HistoryRecord`.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("migration error: {0}")]
    Migration(String),

    /// Connection settings are missing or malformed.
    #[error("invalid database configuration: {0}")]
    Config(String),
}

impl StorageError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// The server's own message for database errors, sqlx's description otherwise.
fn db_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().to_owned(),
        other => other.to_string(),
    }
}
