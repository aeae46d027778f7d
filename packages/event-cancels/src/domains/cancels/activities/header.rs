//! Header cancellation.
//!
//! Cancelling a header cancels every campaign, game and point transaction of
//! the event. Reversing a header leaves its dependents alone.

use tracing::{debug, info, warn};

use crate::common::{CancelFlag, EntityKind, EventId};
use crate::domains::cancels::activities::persist::persist;
use crate::domains::cancels::error::CancelError;
use crate::domains::cancels::models::{Campaign, DependentRecord, Game, Header, PointTransaction};
use crate::domains::cancels::CancelRequest;
use crate::kernel::ServerDeps;

/// Records written by a header cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCascade {
    pub header: Header,
    pub campaigns: Vec<Campaign>,
    pub games: Vec<Game>,
    pub point_transactions: Vec<PointTransaction>,
}

impl HeaderCascade {
    fn header_only(header: Header) -> Self {
        Self {
            header,
            campaigns: Vec::new(),
            games: Vec::new(),
            point_transactions: Vec::new(),
        }
    }
}

/// Apply the requested header flag and cascade a cancellation downwards.
///
/// Returns `Ok(None)` when the request carries no header flag. Dependents
/// written before a failing write stay written.
pub async fn cancel_header(
    request: &CancelRequest,
    deps: &ServerDeps,
) -> Result<Option<HeaderCascade>, CancelError> {
    let session_id = request.runtime_session_id.as_str();
    let event = request.header.event;
    let requested = request.header.is_cancelled;

    if !requested.is_set() {
        debug!(session = %session_id, event, "header flag unset, nothing to cancel");
        return Ok(None);
    }

    let header = write_header(event, requested, session_id, deps).await?;

    if requested == CancelFlag::Reversed {
        info!(session = %session_id, event, "header cancellation reversed");
        return Ok(Some(HeaderCascade::header_only(header)));
    }

    let campaigns = deps
        .store
        .read_campaigns(event)
        .await
        .map_err(|e| unreadable(EntityKind::Campaign, e, session_id))?;
    let campaigns = cascade_to(campaigns, requested, session_id, deps).await?;

    let games = deps
        .store
        .read_games(event)
        .await
        .map_err(|e| unreadable(EntityKind::Game, e, session_id))?;
    let games = cascade_to(games, requested, session_id, deps).await?;

    let point_transactions = deps
        .store
        .read_point_transactions(event)
        .await
        .map_err(|e| unreadable(EntityKind::PointTransaction, e, session_id))?;
    let point_transactions = cascade_to(point_transactions, requested, session_id, deps).await?;

    info!(
        session = %session_id,
        event,
        campaigns = campaigns.len(),
        games = games.len(),
        point_transactions = point_transactions.len(),
        "header cancelled with dependents"
    );

    Ok(Some(HeaderCascade {
        header,
        campaigns,
        games,
        point_transactions,
    }))
}

/// Read the persisted header, overwrite its flag and write it back.
pub(crate) async fn write_header(
    event: EventId,
    flag: CancelFlag,
    session_id: &str,
    deps: &ServerDeps,
) -> Result<Header, CancelError> {
    let mut header = match deps.store.read_header(event).await {
        Ok(Some(header)) => header,
        Ok(None) => {
            return Err(unreadable(
                EntityKind::Header,
                anyhow::anyhow!("no header for event {}", event),
                session_id,
            ))
        }
        Err(e) => return Err(unreadable(EntityKind::Header, e, session_id)),
    };

    header.is_cancelled = flag;
    persist(EntityKind::Header, &header, session_id, deps).await?;
    Ok(header)
}

async fn cascade_to<R: DependentRecord>(
    mut records: Vec<R>,
    flag: CancelFlag,
    session_id: &str,
    deps: &ServerDeps,
) -> Result<Vec<R>, CancelError> {
    for record in records.iter_mut() {
        record.set_cancelled(flag);
        persist(R::KIND, &*record, session_id, deps).await?;
    }
    Ok(records)
}

fn unreadable(kind: EntityKind, reason: anyhow::Error, session_id: &str) -> CancelError {
    let err = CancelError::unreadable(kind, reason);
    warn!(session = %session_id, error = %err, "aborting cancellation");
    err
}
