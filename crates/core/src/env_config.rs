//! Helpers for reading configuration values that were looked up from the
//! environment (or any other key/value source).
//!
//! Callers pass the raw value in rather than reading `std::env` here, so
//! configuration can be assembled from a map in tests.

use std::fmt::Display;
use std::str::FromStr;

/// Parse a configuration value, falling back to `default`.
///
/// - unset or blank: returns `default` silently.
/// - set but unparseable: logs a warning and returns `default`.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, raw: Option<&str>, default: T) -> T {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(var, value, default = %default, "invalid config value, using default");
            default
        },
    }
}

/// Require a non-blank configuration value.
pub fn env_required(var: &str, raw: Option<String>) -> Result<String, String> {
    raw.filter(|v| !v.trim().is_empty()).ok_or_else(|| format!("{var} must be set"))
}
