use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CancelFlag, EventId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub event: EventId,
    #[serde(default)]
    pub is_cancelled: CancelFlag,
}

// =============================================================================
// Header Queries
// =============================================================================

impl Header {
    pub fn new(event: EventId, is_cancelled: CancelFlag) -> Self {
        Self {
            event,
            is_cancelled,
        }
    }

    pub async fn find_by_event(event: EventId, pool: &PgPool) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, (i32, Option<bool>)>(
            "SELECT event, is_cancelled FROM event_headers WHERE event = $1",
        )
        .bind(event)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(event, is_cancelled)| Self::new(event, is_cancelled.into())))
    }
}
