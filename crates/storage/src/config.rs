//! Database connection settings, resolved once at startup and handed to the
//! store explicitly.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use algae_history_core::{DEFAULT_DB_HOST, DEFAULT_DB_PORT, env_parse_with_default, env_required};
use sqlx::postgres::PgConnectOptions;

use crate::error::StorageError;

/// Where and as whom to connect.
///
/// Either a full `DATABASE_URL` or the discrete `DB_HOST` / `DB_PORT` /
/// `DB_USER` / `DB_PASSWORD` / `DB_NAME` settings, parsed up front so that a
/// bad setting stops the process at startup. `Debug` never prints the
/// password.
#[derive(Clone)]
pub struct DatabaseConfig {
    options: PgConnectOptions,
}

impl DatabaseConfig {
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| StorageError::Config(format!("DATABASE_URL: {e}")))?;
        Ok(Self { options })
    }

    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        let (host, username, password, database): (String, String, String, String) =
            (host.into(), username.into(), password.into(), database.into());
        let options = PgConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&username)
            .password(&password)
            .database(&database);
        Self { options }
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve settings from an arbitrary key/value source.
    ///
    /// `DATABASE_URL` wins when present; otherwise `DB_USER` and `DB_NAME` are
    /// required and host/port fall back to `localhost:5432`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Self::from_url(url.trim());
        }

        let host = lookup("DB_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_HOST.to_owned());
        let port = env_parse_with_default("DB_PORT", lookup("DB_PORT").as_deref(), DEFAULT_DB_PORT);
        let username = env_required("DB_USER", lookup("DB_USER")).map_err(StorageError::Config)?;
        let password = lookup("DB_PASSWORD").unwrap_or_default();
        let database = env_required("DB_NAME", lookup("DB_NAME")).map_err(StorageError::Config)?;

        Ok(Self::new(host, port, username, password, database))
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, StorageError> {
        Self::from_lookup(|var| vars.get(var).cloned())
    }

    pub(crate) fn connect_options(&self) -> &PgConnectOptions {
        &self.options
    }

    /// A log-safe description of the target.
    pub fn describe(&self) -> String {
        format!(
            "{}:{}/{}",
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or_default()
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("username", &self.options.get_username())
            .field("password", &"<redacted>")
            .field("database", &self.options.get_database())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn url_takes_precedence() {
        let config = DatabaseConfig::from_map(&vars(&[
            ("DATABASE_URL", "postgres://u:p@db:5433/algae"),
            ("DB_USER", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.describe(), "db:5433/algae");
        assert_eq!(config.connect_options().get_username(), "u");
    }

    #[test]
    fn discrete_settings_with_defaults() {
        let config =
            DatabaseConfig::from_map(&vars(&[("DB_USER", "analyst"), ("DB_NAME", "algae")])).unwrap();
        assert_eq!(config.describe(), "localhost:5432/algae");
        assert_eq!(config.connect_options().get_username(), "analyst");
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = DatabaseConfig::from_map(&vars(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "not-a-port"),
            ("DB_USER", "analyst"),
            ("DB_NAME", "algae"),
        ]))
        .unwrap();
        assert_eq!(config.describe(), "db.internal:5432/algae");
    }

    #[test]
    fn missing_required_settings() {
        let err = DatabaseConfig::from_map(&vars(&[("DB_NAME", "algae")])).unwrap_err();
        assert!(matches!(err, StorageError::Config(ref msg) if msg == "DB_USER must be set"));

        let err = DatabaseConfig::from_map(&vars(&[("DB_USER", "analyst")])).unwrap_err();
        assert!(matches!(err, StorageError::Config(ref msg) if msg == "DB_NAME must be set"));
    }

    #[test]
    fn malformed_url_is_rejected_up_front() {
        let err = DatabaseConfig::from_url("definitely not a url").unwrap_err();
        assert!(matches!(err, StorageError::Config(ref msg) if msg.starts_with("DATABASE_URL: ")));

        let err = DatabaseConfig::from_map(&vars(&[
            ("DATABASE_URL", "not a url"),
            ("DB_USER", "analyst"),
            ("DB_NAME", "algae"),
        ]))
        .unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let config = DatabaseConfig::new("localhost", 5432, "analyst", "hunter2", "algae");
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));

        let printed = format!("{:?}", DatabaseConfig::from_url("postgres://u:hunter2@db/algae").unwrap());
        assert!(!printed.contains("hunter2"));
    }
}
