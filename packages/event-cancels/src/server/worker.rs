//! Request worker.
//!
//! Pulls cancellation requests off the input subject, runs each one in its
//! own task and sends the output back to the requester.

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::domains::cancels::{handle_request, CancelOutput, CancelRequest};
use crate::kernel::{NatsTransport, ServerDeps};

/// A message received on the input subject.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub payload: Bytes,
    pub reply: Option<String>,
}

impl From<async_nats::Message> for InboundMessage {
    fn from(message: async_nats::Message) -> Self {
        Self {
            payload: message.payload,
            reply: message.reply.map(|subject| subject.to_string()),
        }
    }
}

pub struct Worker {
    deps: ServerDeps,
    transport: Arc<dyn NatsTransport>,
    output_subject: String,
    permits: Arc<Semaphore>,
}

impl Worker {
    pub fn new(
        deps: ServerDeps,
        transport: Arc<dyn NatsTransport>,
        output_subject: impl Into<String>,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            deps,
            transport,
            output_subject: output_subject.into(),
            permits: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }

    /// Consume messages until the stream ends, then wait for in-flight requests.
    pub async fn run<S>(self, messages: S) -> Result<()>
    where
        S: Stream<Item = InboundMessage>,
    {
        futures::pin_mut!(messages);
        let worker = Arc::new(self);
        let mut in_flight = JoinSet::new();

        while let Some(message) = messages.next().await {
            let permit = worker
                .permits
                .clone()
                .acquire_owned()
                .await
                .context("worker semaphore closed")?;
            let worker = worker.clone();

            in_flight.spawn(async move {
                if let Err(e) = worker.handle_message(message).await {
                    error!(error = %e, "failed to answer cancellation request");
                }
                drop(permit);
            });

            // Reap finished tasks so the set does not grow unbounded
            while in_flight.try_join_next().is_some() {}
        }

        while in_flight.join_next().await.is_some() {}
        info!("input stream closed, worker stopped");
        Ok(())
    }

    /// Decode, process and answer one message.
    ///
    /// Returns `Ok(None)` for payloads that are not a cancellation request.
    pub async fn handle_message(&self, message: InboundMessage) -> Result<Option<CancelOutput>> {
        let request: CancelRequest = match serde_json::from_slice(&message.payload) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "dropping undecodable request");
                return Ok(None);
            }
        };

        info!(
            session = %request.runtime_session_id,
            api_type = %request.api_type,
            accepters = ?request.accepter,
            "processing cancellation request"
        );

        let output = handle_request(&request, &self.deps).await;
        let payload = serde_json::to_vec(&output).context("failed to encode output")?;
        let subject = message
            .reply
            .unwrap_or_else(|| self.output_subject.clone());

        self.transport
            .publish(subject, Bytes::from(payload))
            .await
            .with_context(|| format!("failed to send output for {}", request.runtime_session_id))?;

        Ok(Some(output))
    }
}
