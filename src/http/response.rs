//! Response shaping and error-to-status mapping.
//!
//! Every processing outcome, including failures, is returned as a
//! `ProcessResponse` envelope with a status code chosen here.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::types::ProcessResponse;
use crate::processing::ProcessError;

pub const SUCCESS_MESSAGE: &str = "Data processed successfully!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error occurred";
pub const HEALTH_MESSAGE: &str = "Backend is running!";

/// A status code paired with an envelope body.
#[derive(Debug)]
pub struct Envelope {
    pub status: StatusCode,
    pub body: ProcessResponse,
}

impl Envelope {
    pub fn new(status: StatusCode, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            status,
            body: ProcessResponse::new(message, data),
        }
    }

    pub fn success(processed: String) -> Self {
        Self::new(StatusCode::OK, SUCCESS_MESSAGE, processed)
    }

    /// Map a processing failure; `original` is echoed back untransformed.
    pub fn from_error(err: &ProcessError, original: String) -> Self {
        match err {
            ProcessError::InvalidInput(detail) => {
                Self::new(StatusCode::BAD_REQUEST, format!("Error: {detail}"), original)
            }
            ProcessError::Internal(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE, original)
            }
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Turn a handler panic into the generic 500 envelope.
///
/// The request body is gone by the time a panic is caught, so `data` is empty.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    Envelope::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE, String::new())
        .into_response()
}
