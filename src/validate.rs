//! Request validation. Runs before any storage call, so malformed input
//! never reaches the database.

use chrono::NaiveDateTime;

use crate::models::event::DATE_FORMAT;
use crate::models::{EventChanges, EventPatch, NewEvent};
use crate::utils::error::AppError;

/// Field names required on create, in the order they are reported back.
const REQUIRED_FIELDS: [&str; 4] = ["title", "description", "event_date", "location"];

/// Checks a create request: all four fields must be present and the date
/// must match the wire format.
pub fn validate_create(patch: EventPatch) -> Result<NewEvent, AppError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .zip([
            patch.title.is_none(),
            patch.description.is_none(),
            patch.event_date.is_none(),
            patch.location.is_none(),
        ])
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    // Presence was just checked; the unwraps cannot fire from here on. An
    // explicit null description counts as supplied and inserts NULL.
    let event_date = parse_event_date(&patch.event_date.unwrap())?;

    Ok(NewEvent {
        title: patch.title.unwrap(),
        description: patch.description.unwrap(),
        event_date,
        location: patch.location.unwrap(),
    })
}

/// Checks an update request: every field is optional, only supplied fields
/// are validated.
pub fn validate_update(patch: EventPatch) -> Result<EventChanges, AppError> {
    let event_date = match patch.event_date {
        Some(raw) => Some(parse_event_date(&raw)?),
        None => None,
    };

    Ok(EventChanges {
        title: patch.title,
        description: patch.description,
        event_date,
        location: patch.location,
    })
}

fn parse_event_date(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(|_| AppError::InvalidEventDate)
}
