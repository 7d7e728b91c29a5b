use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::models::Event;

#[derive(Serialize)]
pub struct EventCreatedBody {
    pub message: String,
    pub event_id: i32,
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventListBody {
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct SingleEventBody {
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventUpdatedBody {
    pub message: String,
    pub event_id: i32,
    pub updated_event: Event,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn event_created(event: Event) -> Response {
    let body = EventCreatedBody {
        message: "Event created successfully".to_string(),
        event_id: event.id,
        event,
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn event_list(events: Vec<Event>) -> Response {
    (StatusCode::OK, Json(EventListBody { events })).into_response()
}

pub fn single_event(event: Event) -> Response {
    (StatusCode::OK, Json(SingleEventBody { event })).into_response()
}

pub fn event_updated(message: impl Into<String>, event: Event) -> Response {
    let body = EventUpdatedBody {
        message: message.into(),
        event_id: event.id,
        updated_event: event,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn message(message: impl Into<String>) -> Response {
    let body = MessageBody {
        message: message.into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub fn not_found_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}
