//! Runs one handler per accepter and merges what they wrote.

use tracing::{debug, info};

use crate::common::EntityKind;
use crate::domains::cancels::activities::dependents::cancel_dependents;
use crate::domains::cancels::activities::header::cancel_header;
use crate::domains::cancels::data::{CancelMessage, CancelRequest};
use crate::domains::cancels::error::CancelError;
use crate::kernel::ServerDeps;

/// First reported failure of a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeFailure {
    pub kind: EntityKind,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeOutcome {
    pub message: CancelMessage,
    pub failure: Option<CascadeFailure>,
}

impl CascadeOutcome {
    /// Keep the first reportable failure. Unreadable state is not reported.
    fn record(&mut self, err: &CancelError) {
        let Some(message) = err.user_message() else {
            return;
        };
        if self.failure.is_none() {
            self.failure = Some(CascadeFailure {
                kind: err.kind(),
                message,
            });
        }
    }
}

/// Process the request's accepters in order.
///
/// A failing handler contributes nothing but does not stop later accepters.
/// Unknown accepter names are skipped.
pub async fn run_cascade(request: &CancelRequest, deps: &ServerDeps) -> CascadeOutcome {
    let session_id = request.runtime_session_id.as_str();
    let event = request.header.event;
    let mut outcome = CascadeOutcome::default();

    for accepter in &request.accepter {
        let Some(kind) = EntityKind::from_accepter(accepter) else {
            debug!(session = %session_id, accepter = %accepter, "ignoring unknown accepter");
            continue;
        };

        match kind {
            EntityKind::Header => match cancel_header(request, deps).await {
                Ok(Some(cascade)) => {
                    outcome.message.header = Some(cascade.header);
                    outcome.message.campaign.extend(cascade.campaigns);
                    outcome.message.game.extend(cascade.games);
                    outcome
                        .message
                        .point_transaction
                        .extend(cascade.point_transactions);
                }
                Ok(None) => outcome.message.header = None,
                Err(e) => {
                    outcome.message.header = None;
                    outcome.record(&e);
                }
            },
            EntityKind::Campaign => {
                match cancel_dependents(event, &request.header.campaign, session_id, deps).await {
                    Ok(written) => outcome.message.campaign.extend(written),
                    Err(e) => outcome.record(&e),
                }
            }
            EntityKind::Game => {
                match cancel_dependents(event, &request.header.game, session_id, deps).await {
                    Ok(written) => outcome.message.game.extend(written),
                    Err(e) => outcome.record(&e),
                }
            }
            EntityKind::PointTransaction => {
                match cancel_dependents(event, &request.header.point_transaction, session_id, deps)
                    .await
                {
                    Ok(written) => outcome.message.point_transaction.extend(written),
                    Err(e) => outcome.record(&e),
                }
            }
        }
    }

    info!(
        session = %session_id,
        event,
        failed = outcome.failure.is_some(),
        "cascade finished"
    );

    outcome
}
