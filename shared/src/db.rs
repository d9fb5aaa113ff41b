//! Postgres connection pool for the events table.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use crate::secrets::DatabaseCredentials;
use crate::{Config, Error, Result};

/// Connection options built field by field, so passwords need no URL escaping.
pub fn connect_options(config: &Config, credentials: &DatabaseCredentials) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(credentials.host(config))
        .port(credentials.port())
        .username(&credentials.username)
        .password(&credentials.password)
        .database(credentials.database(config))
}

/// Create a small pool; one Lambda container serves one request at a time.
pub async fn create_pool(config: &Config, credentials: &DatabaseCredentials) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(connect_options(config, credentials))
        .await
        .map_err(Error::Database)
}
