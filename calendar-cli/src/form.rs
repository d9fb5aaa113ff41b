//! Event creation form: field collection, time-range formatting and submission.

use inquire::{InquireError, Text};
use shared::{CreateEventData, Error, Event, EventService, Result};
use tracing::{error, info};

use crate::cli::CreateArgs;

/// Render a 24-hour `HH:MM` time as `H:MM AM/PM`.
///
/// Minutes are kept exactly as typed; anything after them (`:SS`) is ignored.
pub fn format_time_12h(time24: &str) -> Result<String> {
    let invalid = || Error::Validation(format!("Invalid time '{}'. Use HH:MM", time24));

    let mut parts = time24.trim().split(':');
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().ok_or_else(invalid)?;

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    if hour > 23 || minutes.is_empty() || !minutes.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{}:{} {}", hour12, minutes, if hour >= 12 { "PM" } else { "AM" }))
}

/// Combine a start/end pair into `H:MM AM/PM - H:MM AM/PM`.
pub fn time_range(start: &str, end: &str) -> Result<String> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(Error::Validation(
            "Both start time and end time are required".to_string(),
        ));
    }
    Ok(format!("{} - {}", format_time_12h(start)?, format_time_12h(end)?))
}

/// Values entered for a new event. Times are `HH:MM`, 24-hour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub link: String,
    submitting: bool,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the form from command-line values, prompting for anything left out.
    pub fn prompt(args: CreateArgs) -> std::result::Result<Self, InquireError> {
        Ok(Self {
            title: ask(args.title, "Title", true)?,
            description: ask(args.description, "Description", true)?,
            date: ask(args.date, "Date (YYYY-MM-DD)", true)?,
            start_time: ask(args.start, "Start time (HH:MM)", true)?,
            end_time: ask(args.end, "End time (HH:MM)", true)?,
            location: ask(args.location, "Location", true)?,
            link: ask(args.link, "Link (optional)", false)?,
            submitting: false,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Names of required fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("start time", &self.start_time),
            ("end time", &self.end_time),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// The payload sent to the create endpoint.
    pub fn to_create_data(&self) -> Result<CreateEventData> {
        let missing: Vec<&str> = self
            .missing_fields()
            .into_iter()
            .filter(|name| !name.ends_with("time"))
            .collect();
        if let Some(field) = missing.first() {
            return Err(Error::Validation(format!("Missing required field: {}", field)));
        }

        Ok(CreateEventData {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: time_range(&self.start_time, &self.end_time)?,
            location: self.location.clone(),
            link: self.link.clone(),
        })
    }

    /// Mark the form as in flight and hand out the payload to send.
    ///
    /// Refused while an earlier submission has not been finished.
    pub fn begin_submit(&mut self) -> Result<CreateEventData> {
        if self.submitting {
            return Err(Error::Validation("Event is already being submitted".to_string()));
        }
        let data = self.to_create_data()?;
        self.submitting = true;
        Ok(data)
    }

    /// Settle an in-flight submission. Success clears the form; failure keeps
    /// the values so the user can correct and resend them.
    pub fn finish_submit(&mut self, result: Result<Event>) -> Result<Event> {
        self.submitting = false;
        match result {
            Ok(event) => {
                info!("Event created: {}", event.id.as_deref().unwrap_or("<no id>"));
                *self = Self::default();
                Ok(event)
            }
            Err(e) => {
                error!("Error creating event: {}", e);
                Err(e)
            }
        }
    }

    /// Submit the form and return the server's record.
    pub async fn submit<S: EventService>(&mut self, service: &S) -> Result<Event> {
        let data = self.begin_submit()?;
        let result = service.create_event(&data).await;
        self.finish_submit(result)
    }
}

fn ask(value: Option<String>, label: &str, required: bool) -> std::result::Result<String, InquireError> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut prompt = Text::new(label);
    if required {
        prompt = prompt.with_validator(inquire::required!());
    }
    prompt.prompt()
}
