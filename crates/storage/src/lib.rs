//! Storage layer for algae-history
//!
//! A single `history` table in PostgreSQL. Every operation opens its own
//! connection and closes it before returning; there is no pool.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod config;
mod error;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use config::DatabaseConfig;
pub use error::StorageError;
pub use pg_storage::PgHistoryStore;
pub use traits::HistoryStore;
