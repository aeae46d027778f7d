use thiserror::Error;

use crate::common::EntityKind;
use crate::kernel::GatewayError;

/// Why a cancellation handler stopped early.
#[derive(Error, Debug)]
pub enum CancelError {
    /// Current state could not be read. Not reported to the caller.
    #[error("{kind} state could not be read: {reason:#}")]
    Unreadable {
        kind: EntityKind,
        reason: anyhow::Error,
    },

    #[error("{kind} write failed: {source}")]
    Persistence {
        kind: EntityKind,
        #[source]
        source: GatewayError,
    },
}

impl CancelError {
    pub fn unreadable(kind: EntityKind, reason: anyhow::Error) -> Self {
        Self::Unreadable { kind, reason }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Unreadable { kind, .. } | Self::Persistence { kind, .. } => *kind,
        }
    }

    /// Message reported in `sql_update_error`, if this failure is reported at all.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Unreadable { .. } => None,
            Self::Persistence { kind, .. } => Some(kind.failure_message()),
        }
    }
}
