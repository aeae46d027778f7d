//! Kernel module - worker infrastructure and dependencies.

pub mod deps;
pub mod gateway;
pub mod nats;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use gateway::{Acknowledgement, GatewayError, PersistenceCommand, SqlGateway};
pub use nats::{NatsClientTransport, NatsTransport, PublishedMessage, TestNats};
pub use store::PgEventStore;
pub use test_dependencies::{InMemoryEventStore, TestDependencies, WrittenCommand};
pub use traits::*;
