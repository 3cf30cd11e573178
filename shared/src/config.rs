//! Environment-based configuration
//!
//! Target tables, buckets, and user-pool identifiers are supplied through
//! environment variables. Table and bucket names fall back to fixed
//! defaults; the Cognito identifiers have no sensible default and are
//! required at startup.

use crate::errors::{Error, Result};

/// Read an environment variable, falling back to `default` when unset
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Read a required environment variable
pub fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Internal(format!("{name} is not set")))
}

pub fn events_table() -> String {
    env_or("EVENTS_TABLE", "Events")
}

pub fn audit_table() -> String {
    env_or("AUDIT_TABLE", "Audit")
}

pub fn weather_table() -> String {
    env_or("WEATHER_TABLE", "Weather")
}

pub fn tables_table() -> String {
    env_or("TABLES_TABLE", "Tables")
}

pub fn reservations_table() -> String {
    env_or("RESERVATIONS_TABLE", "Reservations")
}

pub fn uuid_bucket() -> String {
    env_or("UUID_BUCKET", "uuid-storage")
}

pub fn user_pool_id() -> Result<String> {
    required_env("USER_POOL_ID")
}

pub fn user_pool_client_id() -> Result<String> {
    required_env("CLIENT_ID")
}
