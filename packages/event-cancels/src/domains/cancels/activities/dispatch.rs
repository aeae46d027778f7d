use tracing::error;

use crate::domains::cancels::activities::cascade::run_cascade;
use crate::domains::cancels::data::{CancelOutput, CancelRequest, API_TYPE_CANCELS};
use crate::kernel::ServerDeps;

/// Process a decoded request and build the response for it.
///
/// Unknown api types are logged and answered without a message.
pub async fn handle_request(request: &CancelRequest, deps: &ServerDeps) -> CancelOutput {
    let mut output = CancelOutput::for_request(request);

    match request.api_type.as_str() {
        API_TYPE_CANCELS => {
            let outcome = run_cascade(request, deps).await;
            if let Some(failure) = outcome.failure {
                output.sql_update_result = Some(false);
                output.sql_update_error = failure.message.to_string();
            }
            output.message = Some(outcome.message);
        }
        other => {
            error!(session = %request.runtime_session_id, api_type = %other, "unknown api type");
            output.api_processing_result = false;
            output.api_processing_error = format!("unknown api type {}", other);
        }
    }

    output
}
