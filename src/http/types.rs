//! Wire types for the processing API.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::processing::ProcessError;

/// Body of `POST /api/process`.
///
/// A missing or `null` `data` field decodes to `None` and is rejected by the
/// transform, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub data: Option<String>,
}

impl ProcessRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    /// Boundary sanitation: cap the trimmed input length.
    pub fn check_length(&self, max_input_chars: usize) -> Result<(), ProcessError> {
        let len = self
            .data
            .as_deref()
            .map(|d| d.trim().chars().count())
            .unwrap_or(0);

        if len > max_input_chars {
            return Err(ProcessError::invalid(format!(
                "Data cannot exceed {} characters",
                max_input_chars
            )));
        }
        Ok(())
    }
}

/// Envelope returned for every processing request, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub message: String,
    pub data: String,
    pub timestamp: String,
}

impl ProcessResponse {
    /// Build an envelope stamped with the current time.
    pub fn new(message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// Current time as RFC 3339 in UTC with millisecond precision and an
/// explicit `+00:00` offset.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_request_decoding() {
        let req: ProcessRequest = serde_json::from_str(r#"{"data":"hi"}"#).unwrap();
        assert_eq!(req.data.as_deref(), Some("hi"));

        let req: ProcessRequest = serde_json::from_str("{}").unwrap();
        assert!(req.data.is_none());

        let req: ProcessRequest = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(req.data.is_none());
    }

    #[test]
    fn test_length_check_uses_trimmed_chars() {
        let padded = format!("   {}   ", "x".repeat(10));
        assert!(ProcessRequest::new(padded).check_length(10).is_ok());

        let err = ProcessRequest::new("y".repeat(11)).check_length(10).unwrap_err();
        assert_eq!(err, ProcessError::invalid("Data cannot exceed 10 characters"));

        // Multi-byte chars count once each.
        assert!(ProcessRequest::new("ü".repeat(10)).check_length(10).is_ok());
        assert!(ProcessRequest::default().check_length(10).is_ok());
    }

    #[test]
    fn test_timestamp_is_utc_rfc3339() {
        let ts = now_timestamp();
        assert!(ts.ends_with("+00:00"), "{ts}");
        let parsed = DateTime::parse_from_rfc3339(&ts).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_response_serializes_three_fields() {
        let resp = ProcessResponse::new("ok", "DATA");
        let value = serde_json::to_value(&resp).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["message"], "ok");
        assert_eq!(obj["data"], "DATA");
        assert!(obj["timestamp"].is_string());
    }
}
