use std::sync::Arc;

use crate::store::EventStore;

/// Shared application state: the storage handle chosen at startup, injected
/// into every handler instead of living in a process-global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }
}
