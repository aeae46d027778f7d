// Common types shared between the kernel and domain layers

pub mod cancel_flag;
pub mod types;

pub use cancel_flag::CancelFlag;
pub use types::*;
