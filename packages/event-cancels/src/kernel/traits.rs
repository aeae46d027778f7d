// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no cancellation rules.
// The cascade in domains/cancels reads and writes exclusively through them.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::common::{EntityKind, EventId};
use crate::domains::cancels::models::{Campaign, Game, Header, PointTransaction};
use crate::kernel::gateway::GatewayError;

// =============================================================================
// Event Store Trait (Infrastructure - current persisted state)
// =============================================================================

#[async_trait]
pub trait BaseEventStore: Send + Sync {
    /// Read the header for an event. `None` when no header row exists.
    async fn read_header(&self, event: EventId) -> Result<Option<Header>>;

    async fn read_campaigns(&self, event: EventId) -> Result<Vec<Campaign>>;

    async fn read_games(&self, event: EventId) -> Result<Vec<Game>>;

    async fn read_point_transactions(&self, event: EventId) -> Result<Vec<PointTransaction>>;
}

// =============================================================================
// Persistence Gateway Trait (Infrastructure - acknowledged writes)
// =============================================================================

#[async_trait]
pub trait BasePersistenceGateway: Send + Sync {
    /// Submit one record and wait for its acknowledgement.
    ///
    /// Returns `Ok` only when the write was acknowledged as successful.
    async fn persist(
        &self,
        kind: EntityKind,
        session_id: &str,
        message: Value,
    ) -> Result<(), GatewayError>;
}
