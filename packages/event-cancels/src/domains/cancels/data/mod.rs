pub mod output;
pub mod request;

pub use output::{CancelMessage, CancelOutput};
pub use request::{CancelRequest, HeaderRequest, API_TYPE_CANCELS};
