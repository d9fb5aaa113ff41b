//! Create-event payload validation and record construction.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Event;
use crate::{Error, Result};

/// Required fields, in the order their absence is reported.
const REQUIRED_FIELDS: [&str; 5] = ["title", "description", "date", "time", "location"];

/// Fields with format rules, in the order their violations are reported.
const FORMAT_FIELDS: [&str; 3] = ["date", "time", "link"];

/// Incoming create request. Absent fields deserialize as empty so they are
/// reported as missing rather than as a JSON error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, code = "required"))]
    pub title: String,
    #[validate(length(min = 1, code = "required"))]
    pub description: String,
    #[validate(length(min = 1, code = "required"), custom(function = "validate_date"))]
    pub date: String,
    #[validate(length(min = 1, code = "required"), custom(function = "validate_time"))]
    pub time: String,
    #[validate(length(min = 1, code = "required"))]
    pub location: String,
    #[validate(custom(function = "validate_link"))]
    pub link: String,
}

fn validate_date(date: &str) -> std::result::Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("format").with_message("Invalid date format. Use YYYY-MM-DD".into()))
}

fn validate_time(time: &str) -> std::result::Result<(), ValidationError> {
    if time.trim().is_empty() {
        return Err(ValidationError::new("format").with_message("Time field cannot be empty".into()));
    }
    Ok(())
}

fn validate_link(link: &str) -> std::result::Result<(), ValidationError> {
    let link = link.trim();
    if link.is_empty() || link.starts_with("http://") || link.starts_with("https://") {
        return Ok(());
    }
    Err(ValidationError::new("format")
        .with_message("Link must be a valid URL starting with http:// or https://".into()))
}

/// Pick the single message shown to the caller: missing fields first, then format errors.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let errors_for = |field: &str| {
        fields
            .iter()
            .find(|(name, _)| **name == field)
            .map(|(_, errs)| errs.as_slice())
            .unwrap_or_default()
    };

    for field in REQUIRED_FIELDS {
        if errors_for(field).iter().any(|e| e.code == "required") {
            return format!("Missing required field: {}", field);
        }
    }

    FORMAT_FIELDS
        .iter()
        .flat_map(|field| errors_for(*field).iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid event data".to_string())
}

impl CreateEventRequest {
    /// Validate and turn the request into a stored record with a fresh id.
    pub fn into_event(self) -> Result<Event> {
        self.validate()
            .map_err(|errors| Error::Validation(first_message(&errors)))?;

        let now = Utc::now();
        Ok(Event {
            id: Some(generate_event_id()),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            link: self.link.trim().to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

/// `event_` followed by 12 lowercase hex digits.
pub fn generate_event_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("event_{}", &hex[..12])
}

/// Order events by their date string, keeping arrival order for equal dates.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "  Test Event ".to_string(),
            description: "This is a test event".to_string(),
            date: "2025-12-25".to_string(),
            time: "2:00 PM - 4:00 PM".to_string(),
            location: "Test Location, PA".to_string(),
            link: "https://example.com/test-event".to_string(),
        }
    }

    fn message(request: CreateEventRequest) -> String {
        request.into_event().unwrap_err().to_string()
    }

    #[test]
    fn test_valid_request_is_trimmed_and_stamped() {
        let event = valid_request().into_event().unwrap();
        assert_eq!(event.title, "Test Event");
        assert!(event.id.as_deref().unwrap().starts_with("event_"));
        assert!(event.created_at.is_some());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let request = CreateEventRequest {
            title: String::new(),
            date: "invalid-date".to_string(),
            ..valid_request()
        };
        assert_eq!(message(request), "Missing required field: title");

        let request = CreateEventRequest {
            date: "invalid-date".to_string(),
            location: String::new(),
            ..valid_request()
        };
        assert_eq!(message(request), "Missing required field: location");
    }

    #[test]
    fn test_format_errors() {
        let request = CreateEventRequest {
            date: "12/25/2025".to_string(),
            ..valid_request()
        };
        assert_eq!(message(request), "Invalid date format. Use YYYY-MM-DD");

        let request = CreateEventRequest {
            time: "   ".to_string(),
            ..valid_request()
        };
        assert_eq!(message(request), "Time field cannot be empty");

        let request = CreateEventRequest {
            link: "example.com".to_string(),
            ..valid_request()
        };
        assert_eq!(
            message(request),
            "Link must be a valid URL starting with http:// or https://"
        );
    }

    #[test]
    fn test_link_is_optional() {
        let request = CreateEventRequest {
            link: String::new(),
            ..valid_request()
        };
        assert_eq!(request.into_event().unwrap().link, "");
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_event_id();
        assert_eq!(id.len(), "event_".len() + 12);
        assert!(id["event_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
