pub mod cascade;
pub mod dependents;
pub mod dispatch;
pub mod header;
mod persist;

pub use cascade::{run_cascade, CascadeFailure, CascadeOutcome};
pub use dependents::cancel_dependents;
pub use dispatch::handle_request;
pub use header::{cancel_header, HeaderCascade};
