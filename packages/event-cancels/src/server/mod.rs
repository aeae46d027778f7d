pub mod worker;

pub use worker::{InboundMessage, Worker};
