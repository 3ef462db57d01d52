//! Service layer for algae-history
//!
//! Sits between the HTTP/CLI front-ends and storage: validates write
//! requests and decides how storage failures surface to callers.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod history_service;

pub use error::ServiceError;
pub use history_service::HistoryService;
