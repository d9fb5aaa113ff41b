//! Database credentials from AWS Secrets Manager.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Config, Error, Result};

/// Secret strings already fetched by this container, keyed by ARN.
static SECRET_STRINGS: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn secret_strings() -> &'static RwLock<HashMap<String, String>> {
    SECRET_STRINGS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The JSON document stored in the database secret. Missing connection fields fall
/// back to the environment.
#[derive(Debug, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
}

impl DatabaseCredentials {
    pub fn host<'a>(&'a self, config: &'a Config) -> &'a str {
        self.host.as_deref().unwrap_or(&config.db_host)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(5432)
    }

    pub fn database<'a>(&'a self, config: &'a Config) -> &'a str {
        self.dbname.as_deref().unwrap_or(&config.db_name)
    }
}

/// Fetch a secret string, reusing the value from an earlier call on warm starts.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    if let Some(value) = secret_strings().read().await.get(secret_arn) {
        return Ok(value.clone());
    }

    debug!("Fetching secret {}", secret_arn);
    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let value = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    secret_strings()
        .write()
        .await
        .insert(secret_arn.to_string(), value.clone());
    Ok(value)
}

/// Load the credentials named by `DATABASE_URL_SECRET_ARN`.
pub async fn get_database_credentials(
    client: &SecretsClient,
    config: &Config,
) -> Result<DatabaseCredentials> {
    let raw = get_secret(client, &config.db_secret_arn).await?;
    parse_credentials(&raw)
}

fn parse_credentials(raw: &str) -> Result<DatabaseCredentials> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Aws(format!("Failed to parse database credentials: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            db_host: "env-host".to_string(),
            db_name: "event_calendar".to_string(),
            db_secret_arn: "arn:aws:secretsmanager:us-east-1:000000000000:secret:calendar".to_string(),
            events_table: "events".to_string(),
            aws_region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn test_parse_credentials() {
        let json = r#"{"username":"calendar","password":"secret123","host":"db.example.com","port":6432,"dbname":"calendar_prod"}"#;
        let creds = parse_credentials(json).unwrap();
        assert_eq!(creds.username, "calendar");
        assert_eq!(creds.host(&config()), "db.example.com");
        assert_eq!(creds.port(), 6432);
        assert_eq!(creds.database(&config()), "calendar_prod");
    }

    #[test]
    fn test_connection_fields_fall_back_to_environment() {
        let creds = parse_credentials(r#"{"username":"calendar","password":"p@ss/word"}"#).unwrap();
        assert_eq!(creds.host(&config()), "env-host");
        assert_eq!(creds.port(), 5432);
        assert_eq!(creds.database(&config()), "event_calendar");
    }

    #[test]
    fn test_parse_credentials_rejects_missing_password() {
        let err = parse_credentials(r#"{"username":"calendar"}"#).unwrap_err();
        assert!(matches!(err, Error::Aws(_)));
    }
}
