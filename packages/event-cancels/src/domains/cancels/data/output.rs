use serde::{Deserialize, Serialize};

use crate::domains::cancels::data::CancelRequest;
use crate::domains::cancels::models::{Campaign, Game, Header, PointTransaction};

/// Records written while processing one request, grouped by entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelMessage {
    pub header: Option<Header>,
    pub campaign: Vec<Campaign>,
    pub game: Vec<Game>,
    pub point_transaction: Vec<PointTransaction>,
}

/// Response sent back for every decoded request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOutput {
    pub runtime_session_id: String,
    pub service_label: String,
    pub api_type: String,
    pub accepter: Vec<String>,
    pub message: Option<CancelMessage>,
    /// `Some(false)` once any write failed; left unset otherwise.
    pub sql_update_result: Option<bool>,
    pub sql_update_error: String,
    pub api_processing_result: bool,
    pub api_processing_error: String,
}

impl CancelOutput {
    /// Start an output that echoes the request's routing fields.
    pub fn for_request(request: &CancelRequest) -> Self {
        Self {
            runtime_session_id: request.runtime_session_id.clone(),
            service_label: request.service_label.clone(),
            api_type: request.api_type.clone(),
            accepter: request.accepter.clone(),
            message: None,
            sql_update_result: None,
            sql_update_error: String::new(),
            api_processing_result: true,
            api_processing_error: String::new(),
        }
    }

    /// True when the request was processed and no write failed.
    pub fn is_success(&self) -> bool {
        self.api_processing_result && self.sql_update_result != Some(false)
    }
}
