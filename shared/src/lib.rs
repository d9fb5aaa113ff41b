//! Shared library for the event calendar.
//!
//! This crate provides the event model, the events Lambda's routing and storage,
//! and the HTTP client used by the calendar front end.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod http;
pub mod models;
pub mod routes;
pub mod secrets;
pub mod store;

pub use client::{EventApi, EventService};
pub use config::{ClientConfig, Config};
pub use error::{Error, Result};
pub use models::{ApiResponse, CreateEventData, Event};
pub use secrets::{get_database_credentials, get_secret, DatabaseCredentials};
pub use store::{EventStore, MemoryEventStore, PgEventStore};
