//! Configuration management for the backend Lambda and the calendar client.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

/// Default create/delete endpoint for local development.
pub const DEFAULT_EVENT_ENDPOINT: &str = "http://localhost:9000/eventcalendar";

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Backend configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database host
    pub db_host: String,
    /// Database name
    pub db_name: String,
    /// ARN of the secret containing database credentials
    pub db_secret_arn: String,
    /// Table holding the events
    pub events_table: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let events_table = var("EVENTS_TABLE_NAME").unwrap_or_else(|| "events".to_string());
        if !is_plain_identifier(&events_table) {
            return Err(Error::Config(format!(
                "EVENTS_TABLE_NAME must be a plain SQL identifier, got '{}'",
                events_table
            )));
        }

        let required = |key: &str| var(key).ok_or_else(|| Error::Config(format!("{} not set", key)));

        Ok(Self {
            db_host: required("DATABASE_HOST")?,
            db_name: var("DATABASE_NAME").unwrap_or_else(|| "event_calendar".to_string()),
            db_secret_arn: required("DATABASE_URL_SECRET_ARN")?,
            events_table,
            aws_region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }
}

/// Endpoints and limits used by the calendar client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint accepting POST, DELETE and `GET ?id=`
    pub event_endpoint: String,
    /// Endpoint returning the full event list
    pub calendar_endpoint: String,
    /// Read from `REQUEST_TIMEOUT_MS`; requests are not cut off by it
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_endpoint: DEFAULT_EVENT_ENDPOINT.to_string(),
            calendar_endpoint: DEFAULT_EVENT_ENDPOINT.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Load client configuration from environment variables, falling back to defaults.
    ///
    /// The feed endpoint defaults to the event endpoint, which serves the list on `GET`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = var("EVENT_API_ENDPOINT") {
            config.calendar_endpoint = endpoint.clone();
            config.event_endpoint = endpoint;
        }
        if let Some(feed) = var("CALENDAR_FEED_ENDPOINT") {
            config.calendar_endpoint = feed;
        }
        if let Some(raw) = var("REQUEST_TIMEOUT_MS") {
            config.request_timeout = Duration::from_millis(raw.parse().map_err(|_| {
                Error::Config(format!("REQUEST_TIMEOUT_MS must be milliseconds, got '{}'", raw))
            })?);
        }

        Ok(config)
    }
}

fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("events"));
        assert!(is_plain_identifier("calendar_events_2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2events"));
        assert!(!is_plain_identifier("events; DROP TABLE x"));
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_backend_config_region_and_defaults() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_HOST", "db.internal"),
            ("DATABASE_URL_SECRET_ARN", "arn:secret"),
            ("AWS_REGION", "eu-west-1"),
        ]))
        .unwrap();
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.db_name, "event_calendar");
        assert_eq!(config.events_table, "events");

        let config = Config::from_vars(vars(&[
            ("DATABASE_HOST", "db.internal"),
            ("DATABASE_URL_SECRET_ARN", "arn:secret"),
        ]))
        .unwrap();
        assert_eq!(config.aws_region, "us-east-1");
    }

    #[test]
    fn test_backend_config_requires_host() {
        let err = Config::from_vars(vars(&[("DATABASE_URL_SECRET_ARN", "arn:secret")])).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: DATABASE_HOST not set");
    }

    #[test]
    fn test_client_config_from_vars() {
        assert_eq!(ClientConfig::from_vars(vars(&[])).unwrap(), ClientConfig::default());

        let config = ClientConfig::from_vars(vars(&[
            ("EVENT_API_ENDPOINT", "https://api.example.com/eventcalendar"),
            ("REQUEST_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();
        assert_eq!(config.event_endpoint, "https://api.example.com/eventcalendar");
        assert_eq!(config.calendar_endpoint, "https://api.example.com/eventcalendar");
        assert_eq!(config.request_timeout, Duration::from_millis(2500));

        let config = ClientConfig::from_vars(vars(&[("CALENDAR_FEED_ENDPOINT", "https://feed.example.com")])).unwrap();
        assert_eq!(config.event_endpoint, DEFAULT_EVENT_ENDPOINT);
        assert_eq!(config.calendar_endpoint, "https://feed.example.com");

        assert!(ClientConfig::from_vars(vars(&[("REQUEST_TIMEOUT_MS", "soon")])).is_err());
    }

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.event_endpoint, config.calendar_endpoint);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
