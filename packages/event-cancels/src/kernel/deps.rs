//! Worker dependencies for cancellation activities (using traits for testability)

use std::sync::Arc;

use crate::kernel::{BaseEventStore, BasePersistenceGateway};

/// Dependencies shared by every request the worker processes.
///
/// Cloning is cheap; each request task gets its own copy.
#[derive(Clone)]
pub struct ServerDeps {
    /// Source of current persisted state.
    pub store: Arc<dyn BaseEventStore>,
    /// Acknowledged writes to the SQL update service.
    pub gateway: Arc<dyn BasePersistenceGateway>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseEventStore>, gateway: Arc<dyn BasePersistenceGateway>) -> Self {
        Self { store, gateway }
    }
}
