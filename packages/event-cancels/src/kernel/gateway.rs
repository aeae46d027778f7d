//! SQL update gateway.
//!
//! Every flag change is written by sending a persistence command to the SQL
//! update service over NATS request/reply and reading back its
//! acknowledgement. Only `{"result": "success"}` counts as written.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::common::EntityKind;
use crate::kernel::nats::NatsTransport;
use crate::kernel::BasePersistenceGateway;

/// Envelope sent to the SQL update service.
#[derive(Debug, Clone, Serialize)]
pub struct PersistenceCommand<'a> {
    pub message: Value,
    pub function: &'static str,
    pub runtime_session_id: &'a str,
}

/// Reply from the SQL update service.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement(pub Value);

impl Acknowledgement {
    /// Decode a raw reply. Payloads that are not JSON decode to `null`,
    /// which never counts as success.
    pub fn from_reply(payload: &[u8]) -> Self {
        Self(serde_json::from_slice(payload).unwrap_or(Value::Null))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.0.get("result").and_then(Value::as_str), Some("success"))
    }
}

impl fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to encode persistence command: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),

    #[error("write not acknowledged: {0}")]
    Rejected(Acknowledgement),
}

impl GatewayError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Gateway that writes through the SQL update subject.
pub struct SqlGateway {
    transport: Arc<dyn NatsTransport>,
    subject: String,
}

impl SqlGateway {
    pub fn new(transport: Arc<dyn NatsTransport>, subject: impl Into<String>) -> Self {
        Self {
            transport,
            subject: subject.into(),
        }
    }
}

#[async_trait]
impl BasePersistenceGateway for SqlGateway {
    async fn persist(
        &self,
        kind: EntityKind,
        session_id: &str,
        message: Value,
    ) -> Result<(), GatewayError> {
        let command = PersistenceCommand {
            message,
            function: kind.function_name(),
            runtime_session_id: session_id,
        };
        let payload = serde_json::to_vec(&command)?;

        let reply = self
            .transport
            .request(self.subject.clone(), Bytes::from(payload))
            .await
            .map_err(GatewayError::Transport)?;

        let ack = Acknowledgement::from_reply(&reply);
        debug!(function = %kind, session = %session_id, ack = %ack, "persistence acknowledged");

        if ack.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Rejected(ack))
        }
    }
}
