//! Core types for algae-history
//!
//! Domain types, wire payload validation and timestamp normalization shared
//! by the storage, service and HTTP crates.

mod constants;
mod env_config;
mod error;
mod history;
mod timestamp;

pub use constants::*;
pub use env_config::{env_parse_with_default, env_required};
pub use error::ValidationError;
pub use history::{HistoryPayload, HistoryRecord, Measurement, NewHistoryRecord};
pub use timestamp::{format_analysis_date, parse_analysis_date};
