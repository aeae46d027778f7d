// Common test utilities

#![allow(dead_code)]

use event_cancels::common::{CancelFlag, EventId};
use event_cancels::domains::cancels::{
    Campaign, CancelRequest, Game, Header, HeaderRequest, PointTransaction,
};
use event_cancels::kernel::TestDependencies;

pub const EVENT: EventId = 42;
pub const SESSION: &str = "session-0001";

/// Initialize tracing once. Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dependencies with a persisted header and no dependents.
pub fn with_header() -> TestDependencies {
    init_tracing();
    let deps = TestDependencies::new();
    deps.store.insert_header(Header::new(EVENT, CancelFlag::Unset));
    deps
}

/// Dependencies with a persisted header, two campaigns, two games and one
/// point transaction.
pub fn with_event() -> TestDependencies {
    let deps = with_header();
    deps.store.insert_campaign(Campaign::new(EVENT, 1, CancelFlag::Unset));
    deps.store.insert_campaign(Campaign::new(EVENT, 2, CancelFlag::Unset));
    deps.store.insert_game(Game::new(EVENT, 7, CancelFlag::Unset));
    deps.store.insert_game(Game::new(EVENT, 8, CancelFlag::Unset));
    deps.store.insert_point_transaction(point_transaction(EVENT, CancelFlag::Unset));
    // Belongs to another event and must never be touched
    deps.store.insert_campaign(Campaign::new(EVENT + 1, 99, CancelFlag::Unset));
    deps
}

pub fn point_transaction(event: EventId, is_cancelled: CancelFlag) -> PointTransaction {
    PointTransaction {
        event,
        sender: 100,
        receiver: 200,
        point_condition_record: 3,
        point_condition_sequential_number: 1,
        is_cancelled,
    }
}

pub fn header_request(flag: CancelFlag) -> CancelRequest {
    CancelRequest::new(SESSION, HeaderRequest::new(EVENT, flag)).with_accepters(["Header"])
}

/// Request for dependents only; the header flag is left unset.
pub fn dependent_request(accepter: &str) -> CancelRequest {
    CancelRequest::new(SESSION, HeaderRequest::new(EVENT, CancelFlag::Unset))
        .with_accepters([accepter])
}
