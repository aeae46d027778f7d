use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CancelFlag, EventId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Campaign {
    /// Filled from the request header when omitted.
    #[serde(default)]
    pub event: EventId,
    pub campaign: i32,
    #[serde(default)]
    pub is_cancelled: CancelFlag,
}

impl Campaign {
    pub fn new(event: EventId, campaign: i32, is_cancelled: CancelFlag) -> Self {
        Self {
            event,
            campaign,
            is_cancelled,
        }
    }

    pub async fn find_by_event(event: EventId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, (i32, i32, Option<bool>)>(
            r#"
            SELECT event, campaign, is_cancelled
            FROM event_campaigns
            WHERE event = $1
            ORDER BY campaign
            "#,
        )
        .bind(event)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(event, campaign, is_cancelled)| Self::new(event, campaign, is_cancelled.into()))
            .collect())
    }
}
