pub mod activities;
pub mod data;
pub mod error;
pub mod models;

pub use activities::{handle_request, run_cascade, CascadeFailure, CascadeOutcome};
pub use data::{CancelMessage, CancelOutput, CancelRequest, HeaderRequest};
pub use error::CancelError;
pub use models::{Campaign, DependentRecord, Game, Header, PointTransaction};
