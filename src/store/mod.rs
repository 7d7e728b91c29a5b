//! Persistence layer. Two interchangeable backends implement [`EventStore`]:
//! [`MappedStore`] goes through sqlx's typed row mapping, [`RawStore`] uses
//! hand-written SQL with manual column extraction. Both expose identical
//! semantics; the backend is picked once at startup.

pub mod mapped;
pub mod raw;

pub use mapped::MappedStore;
pub use raw::RawStore;

use async_trait::async_trait;

use crate::models::{Event, EventChanges, NewEvent};
use crate::utils::error::AppError;

/// Outcome of an update. A merge that leaves the row identical is a
/// distinguishable success, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Event),
    Unchanged(Event),
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts one row and returns it with the server-assigned id and
    /// created_at.
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError>;

    /// Returns every row in storage default order.
    async fn list(&self) -> Result<Vec<Event>, AppError>;

    /// Returns the matching row or `NotFound`.
    async fn get(&self, id: i32) -> Result<Event, AppError>;

    /// Merges the supplied fields onto the existing row. `NotFound` if no
    /// row matches; `Unchanged` if the merge is a no-op.
    async fn update(&self, id: i32, changes: EventChanges) -> Result<UpdateOutcome, AppError>;

    /// Removes the row or reports `NotFound`.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
