//! Endpoint handlers.

use std::panic::{catch_unwind, AssertUnwindSafe};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::RequestIdExt;
use crate::http::response::{Envelope, HEALTH_MESSAGE};
use crate::http::server::AppState;
use crate::http::types::ProcessRequest;
use crate::observability::metrics;
use crate::processing::{ProcessError, Transform};

/// `POST /api/process`
pub async fn process_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let request_id = headers.request_id();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let status = rejection_status(&rejection);
            tracing::warn!(
                request_id = %request_id,
                status = %status,
                error = %rejection.body_text(),
                "Rejected request body"
            );
            return Envelope::new(
                status,
                format!("Error: {}", rejection.body_text()),
                String::new(),
            )
            .into_response();
        }
    };

    let result = request
        .check_length(state.max_input_chars)
        .and_then(|()| apply_guarded(state.transform.as_ref(), request.data.as_deref()));
    let original = request.data.unwrap_or_default();

    match result {
        Ok(processed) => {
            metrics::record_transform("ok");
            tracing::debug!(
                request_id = %request_id,
                input_chars = original.chars().count(),
                output_chars = processed.chars().count(),
                "Data processed"
            );
            Envelope::success(processed).into_response()
        }
        Err(err) => {
            match &err {
                ProcessError::InvalidInput(detail) => {
                    metrics::record_transform("invalid");
                    tracing::info!(request_id = %request_id, reason = %detail, "Invalid input");
                }
                ProcessError::Internal(detail) => {
                    metrics::record_transform("error");
                    tracing::error!(request_id = %request_id, error = %detail, "Processing failed");
                }
            }
            Envelope::from_error(&err, original).into_response()
        }
    }
}

/// Undecodable or mistyped JSON is invalid input (400). Transport-level
/// rejections such as 413 and 415 keep their own status.
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    }
}

/// Run the transform, turning a panic into `ProcessError::Internal` so the
/// caller still gets the envelope with its original input.
fn apply_guarded(transform: &dyn Transform, input: Option<&str>) -> Result<String, ProcessError> {
    catch_unwind(AssertUnwindSafe(|| transform.apply(input))).unwrap_or_else(|payload| {
        let detail = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic payload");
        Err(ProcessError::Internal(format!("transform panicked: {detail}")))
    })
}

/// `GET /api/health`
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
