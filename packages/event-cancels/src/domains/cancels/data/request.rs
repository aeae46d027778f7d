use serde::{Deserialize, Serialize};

use crate::common::{CancelFlag, EventId};
use crate::domains::cancels::models::{Campaign, Game, PointTransaction};

/// Only api type the worker acts on.
pub const API_TYPE_CANCELS: &str = "cancels";

/// A decoded cancellation request as it arrives on the input subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub runtime_session_id: String,
    #[serde(default)]
    pub service_label: String,
    pub api_type: String,
    /// Entity types to process, in order.
    #[serde(default)]
    pub accepter: Vec<String>,
    #[serde(rename = "Header")]
    pub header: HeaderRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderRequest {
    pub event: EventId,
    #[serde(default)]
    pub is_cancelled: CancelFlag,
    #[serde(default)]
    pub campaign: Vec<Campaign>,
    #[serde(default)]
    pub game: Vec<Game>,
    #[serde(default)]
    pub point_transaction: Vec<PointTransaction>,
}

impl CancelRequest {
    pub fn new(session_id: impl Into<String>, header: HeaderRequest) -> Self {
        Self {
            runtime_session_id: session_id.into(),
            service_label: String::new(),
            api_type: API_TYPE_CANCELS.to_string(),
            accepter: Vec::new(),
            header,
        }
    }

    pub fn with_accepters<I, S>(mut self, accepters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepter = accepters.into_iter().map(Into::into).collect();
        self
    }
}

impl HeaderRequest {
    pub fn new(event: EventId, is_cancelled: CancelFlag) -> Self {
        Self {
            event,
            is_cancelled,
            campaign: Vec::new(),
            game: Vec::new(),
            point_transaction: Vec::new(),
        }
    }
}
