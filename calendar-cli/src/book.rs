//! In-memory event list shown by the calendar.
//!
//! State lives only for the life of the process. Remote mutations are applied
//! locally only after the server confirms them.

use shared::{Error, Event, EventService, Result};
use tracing::{error, info};

#[derive(Debug, Default, Clone)]
pub struct EventBook {
    events: Vec<Event>,
}

impl EventBook {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id.as_deref() == Some(id))
    }

    /// Replace the whole list with a fresh fetch from the read endpoint.
    pub async fn reload<S: EventService>(&mut self, service: &S) -> Result<usize> {
        let events = service.list_events().await?;
        info!("Loaded {} events", events.len());
        self.events = events;
        Ok(self.events.len())
    }

    /// Record an event returned by a successful create.
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Delete `id` remotely, then drop it from the list.
    ///
    /// On any failure the list is left untouched.
    pub async fn delete<S: EventService>(&mut self, service: &S, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation(
                "Cannot delete event: No event ID available".to_string(),
            ));
        }

        if let Err(e) = service.delete_event(id).await {
            error!("Error deleting event {}: {}", id, e);
            return Err(e);
        }

        self.events.retain(|event| event.id.as_deref() != Some(id));
        info!("Event deleted: {}", id);
        Ok(())
    }
}
