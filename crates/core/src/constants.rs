//! Shared constants for algae-history.

/// Storage and wire format of `analysis_date`.
pub const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel the analysis front-end sends when a measurement is not applicable.
pub const NOT_APPLICABLE: &str = "N/A";

/// Acknowledgement returned after a history row has been inserted.
pub const RECORD_CREATED_MESSAGE: &str = "New history record created successfully.";

/// Default PostgreSQL port when `DB_PORT` is unset.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default PostgreSQL host when `DB_HOST` is unset.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default HTTP listen port (the analysis deployment exposes 4500).
pub const DEFAULT_HTTP_PORT: u16 = 4500;
