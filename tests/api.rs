//! Router-level tests: every endpoint exercised through `oneshot` requests
//! against an in-memory store implementing the same `EventStore` contract
//! as the database backends.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use events_server::models::{Event, EventChanges, NewEvent};
use events_server::routes::create_routes;
use events_server::state::AppState;
use events_server::store::{EventStore, UpdateOutcome};
use events_server::utils::error::AppError;

#[derive(Default)]
struct MemoryStore {
    events: Mutex<Vec<Event>>,
    next_id: AtomicI32,
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let event = Event {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: new_event.title,
            description: new_event.description,
            event_date: new_event.event_date,
            location: new_event.location,
            created_at: Utc::now().naive_utc(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get(&self, id: i32) -> Result<Event, AppError> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: i32, changes: EventChanges) -> Result<UpdateOutcome, AppError> {
        let mut events = self.events.lock().unwrap();
        let existing = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;

        let merged = changes.apply(existing);
        if merged == *existing {
            return Ok(UpdateOutcome::Unchanged(merged));
        }
        *existing = merged.clone();
        Ok(UpdateOutcome::Updated(merged))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn app() -> Router {
    create_routes(AppState::new(Arc::new(MemoryStore::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 100_000)
        .await
        .unwrap();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, parsed)
}

fn launch_payload() -> Value {
    json!({
        "title": "Launch",
        "description": "Kickoff",
        "event_date": "2024-01-01 10:00:00",
        "location": "HQ"
    })
}

#[tokio::test]
async fn root_reports_running() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Event management API running");
}

#[tokio::test]
async fn create_read_delete_lifecycle() {
    let app = app();

    let (status, created) = send(&app, "POST", "/events", Some(launch_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Event created successfully");
    assert_eq!(created["event_id"], 1);
    assert_eq!(created["event"]["title"], "Launch");
    assert_eq!(created["event"]["event_date"], "2024-01-01 10:00:00");

    let (status, fetched) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["event"], created["event"]);

    let (status, deleted) = send(&app, "DELETE", "/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Event deleted successfully");

    let (status, missing) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Event not found");
}

#[tokio::test]
async fn create_rejects_wrong_date_format() {
    let app = app();
    let mut payload = launch_payload();
    payload["event_date"] = json!("2024-01-01");

    let (status, body) = send(&app, "POST", "/events", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("YYYY-MM-DD HH:MM:SS"), "got: {error}");
}

#[tokio::test]
async fn create_lists_missing_fields() {
    let app = app();
    let mut payload = launch_payload();
    payload.as_object_mut().unwrap().remove("location");

    let (status, body) = send(&app, "POST", "/events", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("location"), "got: {error}");
    assert!(!error.contains("title"), "got: {error}");
}

#[tokio::test]
async fn create_without_body_is_rejected() {
    let app = app();
    let (status, body) = send(&app, "POST", "/events", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON or no data provided");
}

#[tokio::test]
async fn create_with_malformed_json_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_all_events() {
    let app = app();
    send(&app, "POST", "/events", Some(launch_payload())).await;
    let mut second = launch_payload();
    second["title"] = json!("Retro");
    send(&app, "POST", "/events", Some(second)).await;

    let (status, body) = send(&app, "GET", "/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Launch");
    assert_eq!(events[1]["title"], "Retro");
}

#[tokio::test]
async fn partial_update_preserves_other_fields() {
    let app = app();
    send(&app, "POST", "/events", Some(launch_payload())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/events/1",
        Some(json!({ "title": "Relaunch" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event updated successfully");
    assert_eq!(body["event_id"], 1);
    assert_eq!(body["updated_event"]["title"], "Relaunch");
    assert_eq!(body["updated_event"]["description"], "Kickoff");
    assert_eq!(body["updated_event"]["event_date"], "2024-01-01 10:00:00");
    assert_eq!(body["updated_event"]["location"], "HQ");
}

#[tokio::test]
async fn null_description_clears_the_field() {
    let app = app();
    send(&app, "POST", "/events", Some(launch_payload())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/events/1",
        Some(json!({ "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event updated successfully");
    assert_eq!(body["updated_event"]["description"], Value::Null);

    let (_, fetched) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(fetched["event"]["description"], Value::Null);
}

#[tokio::test]
async fn noop_update_reports_no_change() {
    let app = app();
    send(&app, "POST", "/events", Some(launch_payload())).await;

    let (status, body) = send(&app, "PUT", "/events/1", Some(json!({ "title": "Launch" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No changes made to event");
    assert_eq!(body["updated_event"]["title"], "Launch");
}

#[tokio::test]
async fn update_rejects_malformed_date_before_lookup() {
    let app = app();

    // No event with this id exists; validation still answers first.
    let (status, body) = send(
        &app,
        "PUT",
        "/events/99",
        Some(json!({ "event_date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("event_date"));
}

#[tokio::test]
async fn missing_ids_return_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/events/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");

    let (status, _) = send(&app, "PUT", "/events/42", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/events/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_event_disappears_from_list() {
    let app = app();
    send(&app, "POST", "/events", Some(launch_payload())).await;
    send(&app, "DELETE", "/events/1", None).await;

    let (status, body) = send(&app, "GET", "/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["events"].as_array().unwrap().is_empty());
}
