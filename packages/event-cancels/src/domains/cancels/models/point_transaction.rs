use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CancelFlag, EventId};

/// Points moved between two participants under an event's point condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointTransaction {
    #[serde(default)]
    pub event: EventId,
    pub sender: i32,
    pub receiver: i32,
    pub point_condition_record: i32,
    pub point_condition_sequential_number: i32,
    #[serde(default)]
    pub is_cancelled: CancelFlag,
}

impl PointTransaction {
    pub async fn find_by_event(event: EventId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, (i32, i32, i32, i32, i32, Option<bool>)>(
            r#"
            SELECT event, sender, receiver, point_condition_record,
                   point_condition_sequential_number, is_cancelled
            FROM event_point_transactions
            WHERE event = $1
            ORDER BY sender, receiver, point_condition_record, point_condition_sequential_number
            "#,
        )
        .bind(event)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    event,
                    sender,
                    receiver,
                    point_condition_record,
                    point_condition_sequential_number,
                    is_cancelled,
                )| Self {
                    event,
                    sender,
                    receiver,
                    point_condition_record,
                    point_condition_sequential_number,
                    is_cancelled: is_cancelled.into(),
                },
            )
            .collect())
    }
}
