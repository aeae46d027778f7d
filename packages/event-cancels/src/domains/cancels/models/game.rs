use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CancelFlag, EventId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    #[serde(default)]
    pub event: EventId,
    pub game: i32,
    #[serde(default)]
    pub is_cancelled: CancelFlag,
}

impl Game {
    pub fn new(event: EventId, game: i32, is_cancelled: CancelFlag) -> Self {
        Self {
            event,
            game,
            is_cancelled,
        }
    }

    pub async fn find_by_event(event: EventId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, (i32, i32, Option<bool>)>(
            "SELECT event, game, is_cancelled FROM event_games WHERE event = $1 ORDER BY game",
        )
        .bind(event)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(event, game, is_cancelled)| Self::new(event, game, is_cancelled.into()))
            .collect())
    }
}
