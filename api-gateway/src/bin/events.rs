//! Events Lambda - CRUD operations for calendar events.
//!
//! Endpoints:
//! - POST /eventcalendar - Create an event
//! - GET /eventcalendar - List events (or one with `?id=`)
//! - DELETE /eventcalendar - Delete an event by id
//!
//! `/events` is accepted as an alias of `/eventcalendar`. Set `EVENT_STORE=memory`
//! to run without a database.

use lambda_http::{run, service_fn, Error};
use shared::{get_database_credentials, Config, EventStore, MemoryEventStore, PgEventStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn connect_store() -> Result<PgEventStore, Error> {
    let config = Config::from_env()?;
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);

    let credentials = get_database_credentials(&secrets_client, &config).await?;
    let pool = shared::db::create_pool(&config, &credentials).await?;

    let store = PgEventStore::new(pool, config.events_table.clone());
    store.ensure_schema().await?;

    info!("Connected to table {} on {}", config.events_table, config.db_host);
    Ok(store)
}

async fn serve<S: EventStore + 'static>(store: S) -> Result<(), Error> {
    let store = Arc::new(store);

    run(service_fn(move |event| {
        let store = store.clone();
        async move { shared::routes::handle(store.as_ref(), event).await }
    }))
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    match std::env::var("EVENT_STORE").as_deref() {
        Ok("memory") => {
            warn!("Using in-memory event store; events are lost when the container stops");
            serve(MemoryEventStore::new()).await
        }
        _ => serve(connect_store().await?).await,
    }
}
