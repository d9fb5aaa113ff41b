//! Shared data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event as stored by the backend and shown by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Free-text time range, e.g. `1:05 PM - 2:30 PM`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    /// Empty when the event has no link
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// The link, if one was given.
    pub fn link(&self) -> Option<&str> {
        let link = self.link.trim();
        (!link.is_empty()).then_some(link)
    }
}

/// Payload for creating an event. The server assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventData {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub link: String,
}

/// Payload for deleting an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventRequest {
    pub id: String,
}

/// Response envelope used by the event endpoint.
///
/// Create and delete fill `message` (and `event` on create), the list route fills
/// `events` and `count`, and failures carry `error` plus a human readable `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_event(event: Event) -> Self {
        Self {
            success: true,
            event: Some(event),
            ..Default::default()
        }
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            success: true,
            count: Some(events.len()),
            events: Some(events),
            ..Default::default()
        }
    }

    pub fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Body returned by the read endpoint.
///
/// The calendar feed returns a bare array; the event endpoint wraps the list in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventFeed {
    Bare(Vec<Event>),
    Wrapped { events: Vec<Event> },
}

impl EventFeed {
    pub fn into_events(self) -> Vec<Event> {
        match self {
            EventFeed::Bare(events) | EventFeed::Wrapped { events } => events,
        }
    }
}
