//! Event storage behind the events Lambda.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use tokio::sync::RwLock;

use crate::models::Event;
use crate::Result;

/// Persistence operations the events Lambda needs.
pub trait EventStore: Send + Sync {
    /// Insert or replace an event. The event must carry an id.
    fn put(&self, event: &Event) -> impl Future<Output = Result<()>> + Send;

    /// All stored events, in no particular order.
    fn scan(&self) -> impl Future<Output = Result<Vec<Event>>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Event>>> + Send;

    /// Remove an event. Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Event row from database
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    date: String,
    time: String,
    location: String,
    link: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            location: row.location,
            link: row.link,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

/// PostgreSQL-backed store.
pub struct PgEventStore {
    pool: PgPool,
    table: String,
}

impl PgEventStore {
    /// `table` must already be a validated identifier (see `Config::from_env`).
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Create the events table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                "date" TEXT NOT NULL,
                "time" TEXT NOT NULL,
                location TEXT NOT NULL,
                link TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
            self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn select_columns(&self) -> String {
        format!(
            r#"SELECT id, title, description, "date", "time", location, link, created_at, updated_at FROM {}"#,
            self.table
        )
    }
}

impl EventStore for PgEventStore {
    async fn put(&self, event: &Event) -> Result<()> {
        let now = Utc::now();
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (id, title, description, "date", "time", location, link, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                "date" = EXCLUDED."date",
                "time" = EXCLUDED."time",
                location = EXCLUDED.location,
                link = EXCLUDED.link,
                updated_at = EXCLUDED.updated_at
            "#,
            self.table
        ))
        .bind(event.id.as_deref())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.link)
        .bind(event.created_at.unwrap_or(now))
        .bind(event.updated_at.unwrap_or(now))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(&self.select_columns())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(&format!("{} WHERE id = $1", self.select_columns()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Event::from))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-process store, used for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }
}

impl EventStore for MemoryEventStore {
    async fn put(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Event>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|event| event.id.as_deref() == Some(id))
            .cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| event.id.as_deref() != Some(id));
        Ok(events.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: Some(id.to_string()),
            title: format!("Event {}", id),
            description: String::new(),
            date: date.to_string(),
            time: "9:00 AM - 10:00 AM".to_string(),
            location: "Room 1".to_string(),
            link: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store_put_replaces_same_id() {
        let store = MemoryEventStore::new();
        store.put(&event("a", "2025-01-01")).await.unwrap();
        store.put(&event("a", "2025-02-02")).await.unwrap();

        let events = store.scan().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2025-02-02");
    }

    #[tokio::test]
    async fn test_memory_store_delete_reports_missing() {
        let store = MemoryEventStore::with_events(vec![event("a", "2025-01-01")]);
        assert!(!store.delete("b").await.unwrap());
        assert!(store.delete("a").await.unwrap());
        assert!(store.get("a").await.unwrap().is_none());
    }
}
