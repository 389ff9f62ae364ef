//! Runtime configuration read from the process environment.
//!
//! Every setting has a `TASKTRACK_` key. Required keys must be present and
//! non-blank; numeric keys fall back to a default when unset but must parse
//! to a positive integer no larger than their maximum when supplied.

use crate::task::adapters::topic::MAX_TOPIC_CAPACITY;
use thiserror::Error;

/// Key holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_KEY: &str = "TASKTRACK_DATABASE_URL";
/// Key holding the notification topic name.
pub const EVENT_TOPIC_KEY: &str = "TASKTRACK_EVENT_TOPIC";
/// Key holding the notification buffer capacity.
pub const EVENT_CAPACITY_KEY: &str = "TASKTRACK_EVENT_CAPACITY";
/// Key holding the maximum number of pooled database connections.
pub const DB_POOL_SIZE_KEY: &str = "TASKTRACK_DB_POOL_SIZE";

/// Notification buffer capacity used when none is configured.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;
/// Largest accepted notification buffer capacity.
pub const MAX_EVENT_CAPACITY: usize = MAX_TOPIC_CAPACITY;
/// Connection pool size used when none is configured.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;
/// Largest accepted connection pool size.
pub const MAX_DB_POOL_SIZE: u32 = 256;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key is unset or blank.
    #[error("missing required configuration key {0}")]
    Missing(&'static str),
    /// A key is set to a value that cannot be used.
    #[error("invalid value {value:?} for configuration key {key}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Settings needed to wire the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTrackConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Topic that domain events are published to.
    pub event_topic: String,
    /// Number of unread notifications buffered per subscriber.
    pub event_capacity: usize,
    /// Maximum number of pooled database connections.
    pub db_pool_size: u32,
}

impl TaskTrackConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a numeric
    /// key is not a positive integer within its maximum.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a numeric
    /// key is not a positive integer within its maximum.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: required(&lookup, DATABASE_URL_KEY)?,
            event_topic: required(&lookup, EVENT_TOPIC_KEY)?,
            event_capacity: bounded(
                &lookup,
                EVENT_CAPACITY_KEY,
                DEFAULT_EVENT_CAPACITY,
                MAX_EVENT_CAPACITY,
            )?,
            db_pool_size: bounded(
                &lookup,
                DB_POOL_SIZE_KEY,
                DEFAULT_DB_POOL_SIZE,
                MAX_DB_POOL_SIZE,
            )?,
        };
        tracing::debug!(
            event_topic = %config.event_topic,
            event_capacity = config.event_capacity,
            db_pool_size = config.db_pool_size,
            "loaded configuration"
        );
        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn bounded<F, T>(lookup: &F, key: &'static str, default: T, max: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() && value <= max => Ok(value),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
