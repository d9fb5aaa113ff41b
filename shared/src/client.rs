//! HTTP client for the event endpoints.

use reqwest::{Client, StatusCode};
use std::future::Future;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::models::{ApiResponse, CreateEventData, DeleteEventRequest, Event, EventFeed};
use crate::{Error, Result};

/// Remote operations the calendar needs. Implemented over HTTP by [`EventApi`].
pub trait EventService {
    /// Fetch every event from the read endpoint.
    fn list_events(&self) -> impl Future<Output = Result<Vec<Event>>>;

    /// Fetch one event by id.
    fn get_event(&self, id: &str) -> impl Future<Output = Result<Event>>;

    /// Create an event and return the record as stored by the server.
    fn create_event(&self, data: &CreateEventData) -> impl Future<Output = Result<Event>>;

    /// Delete an event by id.
    fn delete_event(&self, id: &str) -> impl Future<Output = Result<ApiResponse>>;
}

/// Client for the create/delete endpoint and the read endpoint.
#[derive(Debug, Clone)]
pub struct EventApi {
    http_client: Client,
    config: ClientConfig,
}

impl EventApi {
    /// Create a new client. Requests wait for the server however long it takes;
    /// `request_timeout` is carried in the config but not enforced.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder().build()?;
        Ok(Self { http_client, config })
    }
}

impl EventService for EventApi {
    async fn list_events(&self) -> Result<Vec<Event>> {
        debug!("Fetching events from {}", self.config.calendar_endpoint);

        let response = self.http_client.get(&self.config.calendar_endpoint).send().await?;
        if !response.status().is_success() {
            warn!("Event feed returned {}", response.status());
            return Err(Error::Api("Failed to fetch events".to_string()));
        }

        let feed: EventFeed = response.json().await?;
        Ok(feed.into_events())
    }

    async fn get_event(&self, id: &str) -> Result<Event> {
        let response = self
            .http_client
            .get(&self.config.event_endpoint)
            .query(&[("id", id)])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret_envelope(status, &body, "Failed to fetch event")?
            .event
            .ok_or_else(|| Error::NotFound(format!("No event found with ID: {}", id)))
    }

    async fn create_event(&self, data: &CreateEventData) -> Result<Event> {
        debug!("Creating event '{}' on {}", data.title, data.date);

        let response = self
            .http_client
            .post(&self.config.event_endpoint)
            .json(data)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret_envelope(status, &body, "Failed to create event")?
            .event
            .ok_or_else(|| Error::Api("Failed to create event".to_string()))
    }

    async fn delete_event(&self, id: &str) -> Result<ApiResponse> {
        debug!("Deleting event {}", id);

        let response = self
            .http_client
            .delete(&self.config.event_endpoint)
            .json(&DeleteEventRequest { id: id.to_string() })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret_envelope(status, &body, "Failed to delete event")
    }
}

/// Turn a create/delete response into the envelope or the error the user should see.
///
/// Non-2xx statuses surface the body's `message`, else `HTTP error! status: <code>`.
/// A 2xx body with `success: false` surfaces its `message`, else `fallback`.
pub fn interpret_envelope(status: StatusCode, body: &[u8], fallback: &str) -> Result<ApiResponse> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ApiResponse>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        return Err(Error::Api(message));
    }

    let envelope: ApiResponse = serde_json::from_slice(body)?;
    if !envelope.success {
        return Err(Error::Api(
            envelope.message.unwrap_or_else(|| fallback.to_string()),
        ));
    }

    Ok(envelope)
}
