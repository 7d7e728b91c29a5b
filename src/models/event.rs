use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Wire format for every timestamp field, both directions.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "wire_datetime")]
    pub event_date: NaiveDateTime,
    pub location: String,
    #[serde(with = "wire_datetime")]
    pub created_at: NaiveDateTime,
}

/// Raw request body as the client sent it. Every field is optional here;
/// the validation layer decides what is required for the operation at hand.
///
/// `description` is the one nullable column, so it keeps three states:
/// absent (outer `None`), explicit null (`Some(None)`, clears the column),
/// and a value (`Some(Some(..))`).
#[derive(Debug, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub description: Option<Option<String>>,
    pub event_date: Option<String>,
    pub location: Option<String>,
}

fn nullable_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A fully validated create request, ready to insert.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub location: String,
}

/// A validated partial update. Only supplied fields are applied; `id` and
/// `created_at` are never touched.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub event_date: Option<NaiveDateTime>,
    pub location: Option<String>,
}

impl EventChanges {
    /// Merges these changes onto an existing row, producing the row as it
    /// should look after the update.
    pub fn apply(&self, event: &Event) -> Event {
        Event {
            id: event.id,
            title: self.title.clone().unwrap_or_else(|| event.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| event.description.clone()),
            event_date: self.event_date.unwrap_or(event.event_date),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| event.location.clone()),
            created_at: event.created_at,
        }
    }
}

/// Serde adapter holding timestamps to the `YYYY-MM-DD HH:MM:SS` wire format.
mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
