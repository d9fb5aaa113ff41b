//! Request routing for the events Lambda.
//!
//! Endpoints (path may carry a `/prod`, `/dev` or `/test` stage prefix):
//! - OPTIONS * - CORS preflight
//! - POST /events | /eventcalendar - Create an event
//! - GET /events | /eventcalendar - List events, or one event with `?id=`
//! - DELETE /events | /eventcalendar - Delete by `?id=` or `{"id": ...}` body

use lambda_http::{Body, Request, RequestExt, Response};
use serde::Deserialize;
use tracing::{error, info};

use crate::events::{sort_by_date, CreateEventRequest};
use crate::http::{error_response, json_response};
use crate::models::ApiResponse;
use crate::store::EventStore;
use crate::parse_body;

const STAGE_PREFIXES: [&str; 3] = ["/prod/", "/dev/", "/test/"];

/// Body accepted by DELETE when the id is not in the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeleteBody {
    id: Option<String>,
}

/// Drop an API Gateway stage prefix: `/prod/events` becomes `/events`.
pub fn normalize_path(path: &str) -> String {
    if STAGE_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        let rest: Vec<&str> = path.split('/').skip(2).collect();
        return format!("/{}", rest.join("/"));
    }
    path.to_string()
}

fn is_events_path(path: &str) -> bool {
    path.ends_with("/eventcalendar") || path.ends_with("/events")
}

/// Route one API Gateway request against the store.
pub async fn handle<S: EventStore>(store: &S, event: Request) -> Result<Response<Body>, lambda_http::Error> {
    let method = event.method().as_str().to_string();
    let path = normalize_path(event.uri().path());

    info!("Processing {} request to {}", method, path);

    if method == "OPTIONS" {
        return json_response(200, &serde_json::json!({"message": "CORS preflight successful"}));
    }

    if !is_events_path(&path) {
        return error_response(404, "Not found", format!("{} {} is not supported", method, path));
    }

    let id = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("id"))
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    match method.as_str() {
        "POST" => {
            let request: CreateEventRequest = parse_body!(event.body());
            create_event(store, request).await
        }
        "GET" => match id {
            Some(id) => get_event(store, &id).await,
            None => list_events(store).await,
        },
        "DELETE" => {
            let id = match id {
                Some(id) => Some(id),
                None => serde_json::from_slice::<DeleteBody>(event.body().as_ref())
                    .unwrap_or_default()
                    .id
                    .filter(|id| !id.is_empty()),
            };

            match id {
                Some(id) => delete_event(store, &id).await,
                None => error_response(
                    400,
                    "Bad Request",
                    r#"Event ID is required for deletion. Provide it as query parameter ?id=eventId or in request body {"id": "eventId"}"#,
                ),
            }
        }
        _ => error_response(404, "Not found", format!("{} {} is not supported", method, path)),
    }
}

async fn create_event<S: EventStore>(
    store: &S,
    request: CreateEventRequest,
) -> Result<Response<Body>, lambda_http::Error> {
    let event = match request.into_event() {
        Ok(event) => event,
        Err(e) => return error_response(e.status_code(), "Validation failed", e.to_string()),
    };

    if let Err(e) = store.put(&event).await {
        error!("Database error: {}", e);
        return error_response(500, "Database error", "Failed to save event to database");
    }

    info!("Event created successfully with ID: {}", event.id.as_deref().unwrap_or_default());

    let body = ApiResponse {
        message: Some("Event created successfully".to_string()),
        ..ApiResponse::with_event(event)
    };
    json_response(201, &body)
}

async fn list_events<S: EventStore>(store: &S) -> Result<Response<Body>, lambda_http::Error> {
    match store.scan().await {
        Ok(mut events) => {
            sort_by_date(&mut events);
            info!("Retrieved {} events", events.len());
            json_response(200, &ApiResponse::with_events(events))
        }
        Err(e) => {
            error!("Database error: {}", e);
            error_response(500, "Database error", "Failed to retrieve events from database")
        }
    }
}

async fn get_event<S: EventStore>(store: &S, id: &str) -> Result<Response<Body>, lambda_http::Error> {
    match store.get(id).await {
        Ok(Some(event)) => json_response(200, &ApiResponse::with_event(event)),
        Ok(None) => not_found(id),
        Err(e) => {
            error!("Database error: {}", e);
            error_response(500, "Database error", "Failed to retrieve event from database")
        }
    }
}

async fn delete_event<S: EventStore>(store: &S, id: &str) -> Result<Response<Body>, lambda_http::Error> {
    info!("Deleting event with ID: {}", id);

    match store.delete(id).await {
        Ok(true) => {
            info!("Event deleted successfully with ID: {}", id);
            json_response(200, &ApiResponse::success(format!("Event {} deleted successfully", id)))
        }
        Ok(false) => not_found(id),
        Err(e) => {
            error!("Database error: {}", e);
            error_response(500, "Database error", "Failed to delete event from database")
        }
    }
}

fn not_found(id: &str) -> Result<Response<Body>, lambda_http::Error> {
    error_response(404, "Event not found", format!("No event found with ID: {}", id))
}
