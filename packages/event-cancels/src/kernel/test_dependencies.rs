// TestDependencies - mock implementations for testing
//
// Wires an in-memory event store and a scripted SQL update service into
// ServerDeps so the cascade can be exercised without Postgres or NATS.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use super::{BaseEventStore, NatsTransport, PublishedMessage, ServerDeps, SqlGateway, TestNats};
use crate::common::{EntityKind, EventId};
use crate::domains::cancels::models::{Campaign, Game, Header, PointTransaction};

/// Subject the test gateway writes to.
pub const TEST_SQL_SUBJECT: &str = "test.sql-update";

// =============================================================================
// In-memory Event Store
// =============================================================================

#[derive(Default)]
struct StoredEvents {
    headers: HashMap<EventId, Header>,
    campaigns: Vec<Campaign>,
    games: Vec<Game>,
    point_transactions: Vec<PointTransaction>,
    unreadable: bool,
    unreadable_kinds: HashSet<EntityKind>,
}

/// Event store backed by plain vectors.
#[derive(Default)]
pub struct InMemoryEventStore {
    state: RwLock<StoredEvents>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_header(&self, header: Header) {
        self.write().headers.insert(header.event, header);
    }

    pub fn insert_campaign(&self, campaign: Campaign) {
        self.write().campaigns.push(campaign);
    }

    pub fn insert_game(&self, game: Game) {
        self.write().games.push(game);
    }

    pub fn insert_point_transaction(&self, point_transaction: PointTransaction) {
        self.write().point_transactions.push(point_transaction);
    }

    /// Make every subsequent read fail.
    pub fn set_unreadable(&self, unreadable: bool) {
        self.write().unreadable = unreadable;
    }

    /// Make reads of one entity type fail while the others keep working.
    pub fn set_unreadable_kind(&self, kind: EntityKind) {
        self.write().unreadable_kinds.insert(kind);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoredEvents> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self, kind: EntityKind) -> Result<std::sync::RwLockReadGuard<'_, StoredEvents>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        if state.unreadable || state.unreadable_kinds.contains(&kind) {
            return Err(anyhow!("event store unavailable"));
        }
        Ok(state)
    }
}

#[async_trait]
impl BaseEventStore for InMemoryEventStore {
    async fn read_header(&self, event: EventId) -> Result<Option<Header>> {
        Ok(self.read(EntityKind::Header)?.headers.get(&event).cloned())
    }

    async fn read_campaigns(&self, event: EventId) -> Result<Vec<Campaign>> {
        Ok(self
            .read(EntityKind::Campaign)?
            .campaigns
            .iter()
            .filter(|c| c.event == event)
            .cloned()
            .collect())
    }

    async fn read_games(&self, event: EventId) -> Result<Vec<Game>> {
        Ok(self
            .read(EntityKind::Game)?
            .games
            .iter()
            .filter(|g| g.event == event)
            .cloned()
            .collect())
    }

    async fn read_point_transactions(&self, event: EventId) -> Result<Vec<PointTransaction>> {
        Ok(self
            .read(EntityKind::PointTransaction)?
            .point_transactions
            .iter()
            .filter(|p| p.event == event)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Scripted SQL update service
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum AckFailure {
    Reject,
    Transport,
}

#[derive(Debug, Clone, Copy)]
struct AckRule {
    succeed_first: usize,
    failure: AckFailure,
    seen: usize,
}

/// Per-function acknowledgement rules. Functions without a rule always succeed.
#[derive(Default)]
struct AckScript {
    rules: Mutex<HashMap<&'static str, AckRule>>,
}

impl AckScript {
    fn set(&self, kind: EntityKind, succeed_first: usize, failure: AckFailure) {
        self.rules.lock().unwrap_or_else(|e| e.into_inner()).insert(
            kind.function_name(),
            AckRule {
                succeed_first,
                failure,
                seen: 0,
            },
        );
    }

    fn respond(&self, message: &PublishedMessage) -> Result<Bytes> {
        let command: Value = serde_json::from_slice(&message.payload)?;
        let function = command
            .get("function")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let mut rules = self.rules.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(rule) = rules.get_mut(function) {
            rule.seen += 1;
            if rule.seen > rule.succeed_first {
                return match rule.failure {
                    AckFailure::Reject => Ok(Bytes::from_static(br#"{"result":"failure"}"#)),
                    AckFailure::Transport => Err(anyhow!("connection closed while awaiting reply")),
                };
            }
        }

        Ok(Bytes::from_static(br#"{"result":"success"}"#))
    }
}

/// A persistence command as received by the SQL update service.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenCommand {
    pub function: String,
    pub session_id: String,
    pub message: Value,
}

impl WrittenCommand {
    pub fn is_cancelled(&self) -> Option<bool> {
        self.message.get("IsCancelled").and_then(Value::as_bool)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Test container for ServerDeps.
pub struct TestDependencies {
    pub nats: Arc<TestNats>,
    pub store: Arc<InMemoryEventStore>,
    acks: Arc<AckScript>,
}

impl TestDependencies {
    pub fn new() -> Self {
        let acks = Arc::new(AckScript::default());
        let responder_acks = acks.clone();
        let nats = TestNats::new().with_responder(move |message| responder_acks.respond(message));

        Self {
            nats: Arc::new(nats),
            store: Arc::new(InMemoryEventStore::new()),
            acks,
        }
    }

    /// Acknowledge every write of `kind` with `{"result":"failure"}`.
    pub fn reject(&self, kind: EntityKind) -> &Self {
        self.reject_after(kind, 0)
    }

    /// Acknowledge the first `successes` writes of `kind`, reject the rest.
    pub fn reject_after(&self, kind: EntityKind, successes: usize) -> &Self {
        self.acks.set(kind, successes, AckFailure::Reject);
        self
    }

    /// Fail every write of `kind` at the transport level.
    pub fn drop_connection(&self, kind: EntityKind) -> &Self {
        self.acks.set(kind, 0, AckFailure::Transport);
        self
    }

    pub fn deps(&self) -> ServerDeps {
        let transport: Arc<dyn NatsTransport> = self.nats.clone();
        ServerDeps::new(
            self.store.clone(),
            Arc::new(SqlGateway::new(transport, TEST_SQL_SUBJECT)),
        )
    }

    /// Every persistence command sent so far, in order.
    pub fn written(&self) -> Vec<WrittenCommand> {
        self.nats
            .requests()
            .iter()
            .filter(|m| m.subject == TEST_SQL_SUBJECT)
            .filter_map(|m| self.nats.deserialize_message::<Value>(m).ok())
            .map(|command| WrittenCommand {
                function: command["function"].as_str().unwrap_or_default().to_string(),
                session_id: command["runtime_session_id"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                message: command["message"].clone(),
            })
            .collect()
    }

    pub fn written_functions(&self) -> Vec<String> {
        self.written().into_iter().map(|c| c.function).collect()
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
