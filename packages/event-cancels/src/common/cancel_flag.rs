//! Tri-state cancellation flag.
//!
//! On the wire the flag is a nullable boolean: `true` cancels, `false`
//! reverses a cancellation and `null` (or a missing field) requests no
//! change at all.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum CancelFlag {
    /// No change requested.
    #[default]
    Unset,
    Cancelled,
    /// A previous cancellation is withdrawn.
    Reversed,
}

impl CancelFlag {
    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl From<Option<bool>> for CancelFlag {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Cancelled,
            Some(false) => Self::Reversed,
            None => Self::Unset,
        }
    }
}

impl From<CancelFlag> for Option<bool> {
    fn from(flag: CancelFlag) -> Self {
        match flag {
            CancelFlag::Cancelled => Some(true),
            CancelFlag::Reversed => Some(false),
            CancelFlag::Unset => None,
        }
    }
}

impl std::fmt::Display for CancelFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "unset"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Reversed => write!(f, "reversed"),
        }
    }
}
