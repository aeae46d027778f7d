//! NATS transport abstraction for production and testing.
//!
//! The worker publishes results and the SQL gateway issues request/reply
//! round trips through the same trait, so both can run against a recording
//! mock in tests.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Mutex, RwLock};

/// A message sent through the transport.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub subject: String,
    pub payload: Bytes,
}

/// Trait for NATS operations used by the worker.
#[async_trait]
pub trait NatsTransport: Send + Sync {
    /// Publish a message to a subject without waiting for a reply.
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()>;

    /// Send a request and wait for the reply payload.
    async fn request(&self, subject: String, payload: Bytes) -> Result<Bytes>;
}

/// Real NATS client transport.
pub struct NatsClientTransport {
    client: async_nats::Client,
}

impl NatsClientTransport {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NatsTransport for NatsClientTransport {
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()> {
        self.client
            .publish(subject.clone(), payload)
            .await
            .with_context(|| format!("failed to publish to {}", subject))?;
        Ok(())
    }

    async fn request(&self, subject: String, payload: Bytes) -> Result<Bytes> {
        let reply = self
            .client
            .request(subject.clone(), payload)
            .await
            .with_context(|| format!("request to {} failed", subject))?;
        Ok(reply.payload)
    }
}

type Responder = Box<dyn Fn(&PublishedMessage) -> Result<Bytes> + Send + Sync>;

/// Mock NATS transport that records traffic for testing.
///
/// Requests are answered from the queued replies first, then by the
/// responder. With neither configured a request fails the way a real server
/// without subscribers would.
#[derive(Default)]
pub struct TestNats {
    published: RwLock<Vec<PublishedMessage>>,
    requests: RwLock<Vec<PublishedMessage>>,
    queued_replies: Mutex<VecDeque<Result<Bytes, String>>>,
    responder: RwLock<Option<Responder>>,
}

impl TestNats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unqueued request with the given function.
    pub fn with_responder<F>(self, responder: F) -> Self
    where
        F: Fn(&PublishedMessage) -> Result<Bytes> + Send + Sync + 'static,
    {
        *self.responder.write().unwrap_or_else(|e| e.into_inner()) = Some(Box::new(responder));
        self
    }

    /// Queue a reply for the next request.
    pub fn queue_reply(&self, payload: impl Into<Bytes>) {
        self.queued_replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(payload.into()));
    }

    /// Queue a transport failure for the next request.
    pub fn queue_failure(&self, reason: &str) {
        self.queued_replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(reason.to_string()));
    }

    pub fn published_messages(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn messages_for_subject(&self, subject: &str) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|m| m.subject == subject)
            .cloned()
            .collect()
    }

    /// All requests sent, in order, whether or not they were answered.
    pub fn requests(&self) -> Vec<PublishedMessage> {
        self.requests
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Deserialize a recorded payload as JSON.
    pub fn deserialize_message<T: serde::de::DeserializeOwned>(
        &self,
        msg: &PublishedMessage,
    ) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&msg.payload)
    }
}

#[async_trait]
impl NatsTransport for TestNats {
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()> {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(PublishedMessage { subject, payload });
        Ok(())
    }

    async fn request(&self, subject: String, payload: Bytes) -> Result<Bytes> {
        let message = PublishedMessage { subject, payload };
        self.requests
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());

        let queued = self
            .queued_replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(reply) = queued {
            return reply.map_err(|reason| anyhow!(reason));
        }

        match self
            .responder
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(responder) => responder(&message),
            None => Err(anyhow!("no responders for {}", message.subject)),
        }
    }
}
