use serde::Serialize;
use tracing::{error, warn};

use crate::common::EntityKind;
use crate::domains::cancels::error::CancelError;
use crate::kernel::{GatewayError, ServerDeps};

/// Write one record and wait for the SQL service to acknowledge it.
pub(crate) async fn persist<T: Serialize>(
    kind: EntityKind,
    record: &T,
    session_id: &str,
    deps: &ServerDeps,
) -> Result<(), CancelError> {
    let result = match serde_json::to_value(record) {
        Ok(message) => deps.gateway.persist(kind, session_id, message).await,
        Err(e) => Err(GatewayError::from(e)),
    };

    result.map_err(|source| {
        if source.is_transport() {
            error!(function = %kind, session = %session_id, error = %source, "nats request failed");
        } else {
            warn!(function = %kind, session = %session_id, error = %source, "write rejected");
        }
        CancelError::Persistence { kind, source }
    })
}
