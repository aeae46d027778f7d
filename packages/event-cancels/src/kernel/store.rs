//! Postgres-backed event store.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::EventId;
use crate::domains::cancels::models::{Campaign, Game, Header, PointTransaction};
use crate::kernel::BaseEventStore;

/// Reads current state straight from the event tables.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseEventStore for PgEventStore {
    async fn read_header(&self, event: EventId) -> Result<Option<Header>> {
        Header::find_by_event(event, &self.pool).await
    }

    async fn read_campaigns(&self, event: EventId) -> Result<Vec<Campaign>> {
        Campaign::find_by_event(event, &self.pool).await
    }

    async fn read_games(&self, event: EventId) -> Result<Vec<Game>> {
        Game::find_by_event(event, &self.pool).await
    }

    async fn read_point_transactions(&self, event: EventId) -> Result<Vec<PointTransaction>> {
        PointTransaction::find_by_event(event, &self.pool).await
    }
}
