use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::models::EventPatch;
use crate::state::AppState;
use crate::store::UpdateOutcome;
use crate::utils::error::AppError;
use crate::utils::response::{
    event_created, event_list, event_updated, message, single_event,
};
use crate::validate::{validate_create, validate_update};

pub async fn index() -> &'static str {
    "Event management API running"
}

pub async fn create_event(
    State(state): State<AppState>,
    body: Option<Json<EventPatch>>,
) -> Result<Response, AppError> {
    let Json(patch) = body.ok_or(AppError::EmptyBody)?;
    let new_event = validate_create(patch)?;

    let event = state.store.create(new_event).await?;
    tracing::info!(event_id = event.id, "Event created");

    Ok(event_created(event))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.list().await?;
    Ok(event_list(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<Response, AppError> {
    let event = state.store.get(event_id).await?;
    Ok(single_event(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
    body: Option<Json<EventPatch>>,
) -> Result<Response, AppError> {
    let Json(patch) = body.ok_or(AppError::EmptyBody)?;
    let changes = validate_update(patch)?;

    let outcome = state.store.update(event_id, changes).await?;
    let response = match outcome {
        UpdateOutcome::Updated(event) => {
            tracing::info!(event_id, "Event updated");
            event_updated("Event updated successfully", event)
        }
        UpdateOutcome::Unchanged(event) => event_updated("No changes made to event", event),
    };

    Ok(response)
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<Response, AppError> {
    state.store.delete(event_id).await?;
    tracing::info!(event_id, "Event deleted");

    Ok(message("Event deleted successfully"))
}
