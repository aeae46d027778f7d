//! Campaign, game and point transaction cancellation.
//!
//! Each record carries its own flag. Reversing the first record of a list
//! also reverses the header's cancellation.

use tracing::{debug, info};

use crate::common::{CancelFlag, EventId};
use crate::domains::cancels::activities::header::write_header;
use crate::domains::cancels::activities::persist::persist;
use crate::domains::cancels::error::CancelError;
use crate::domains::cancels::models::DependentRecord;
use crate::kernel::ServerDeps;

/// Write every requested record of one entity type, in order.
///
/// Records with an unset flag are skipped. The first record's flag alone
/// decides whether the header is reversed afterwards. Records written before
/// a failing write are not rolled back.
pub async fn cancel_dependents<R: DependentRecord>(
    event: EventId,
    requested: &[R],
    session_id: &str,
    deps: &ServerDeps,
) -> Result<Vec<R>, CancelError> {
    let kind = R::KIND;
    let Some(first) = requested.first() else {
        debug!(session = %session_id, function = %kind, "no records requested");
        return Ok(Vec::new());
    };
    let reverse_header = first.is_cancelled() == CancelFlag::Reversed;

    let mut written = Vec::with_capacity(requested.len());
    for record in requested {
        if !record.is_cancelled().is_set() {
            continue;
        }
        let mut record = record.clone();
        record.set_event(event);
        persist(kind, &record, session_id, deps).await?;
        written.push(record);
    }

    if reverse_header {
        write_header(event, CancelFlag::Reversed, session_id, deps).await?;
        info!(
            session = %session_id,
            event,
            function = %kind,
            "header cancellation reversed by dependent"
        );
    }

    Ok(written)
}
