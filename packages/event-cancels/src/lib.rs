// Event Cancels - cascading cancellation worker
//
// Consumes cancellation requests for event headers and their dependent
// campaigns, games and point transactions, and writes every flag change
// through the SQL update queue.
//
// Business rules live in domains/cancels; transports and stores in kernel.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
