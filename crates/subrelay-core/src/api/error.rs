//! Subscriber API error normalization
//!
//! Normalizes API error responses and transport failures into a uniform
//! error shape that the pipeline can re-surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single field-level validation failure reported by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the offending field in the submitted record
    pub path: String,
    /// Human-readable description
    pub message: String,
}

/// Error response body shape of the subscriber API
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    #[serde(default)]
    details: Option<Vec<FieldError>>,
}

/// Normalized subscriber API error
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code when the failure came from a response
    pub status_code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Structured validation failures, when the API supplied them
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Build from a non-success response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let (message, details) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (
                parsed
                    .error
                    .unwrap_or_else(|| "failed to update subscriber".to_string()),
                parsed.details,
            ),
            Err(_) => {
                let message = if body.is_empty() {
                    "failed to update subscriber".to_string()
                } else {
                    body
                };
                (message, None)
            }
        };

        Self {
            status_code: Some(status),
            message,
            details,
        }
    }

    /// Build from a transport-level failure.
    ///
    /// Timeouts are reported as status 408 so callers see a status-shaped
    /// failure rather than a bare network error.
    pub fn from_request_error(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            return Self {
                status_code: Some(408),
                message: format!("request timeout after {}ms", timeout.as_millis()),
                details: None,
            };
        }

        Self {
            status_code: error.status().map(|s| s.as_u16()),
            message: format!("network error: {error}"),
            details: None,
        }
    }

    /// Whether this is a 400-class failure carrying structured field detail.
    pub fn is_validation_error(&self) -> bool {
        matches!(self.status_code, Some(400..=499)) && self.details.is_some()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "subscriber API error ({code}): {}", self.message),
            None => write!(f, "subscriber API error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for crate::Error {
    fn from(error: ApiError) -> Self {
        let message = match (error.status_code, error.is_validation_error()) {
            (Some(code), true) => {
                format!("subscriber API validation error ({code}): {}", error.message)
            }
            (Some(code), false) => format!("subscriber API error ({code}): {}", error.message),
            (None, _) => format!("subscriber API error: {}", error.message),
        };

        crate::Error::Api {
            message,
            status_code: error.status_code,
            details: error.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: Option<u16>, details: Option<Vec<FieldError>>) -> ApiError {
        ApiError {
            status_code: status,
            message: "email is invalid".to_string(),
            details,
        }
    }

    #[test]
    fn test_validation_error_requires_details() {
        assert!(!api_error(Some(400), None).is_validation_error());
        assert!(api_error(
            Some(400),
            Some(vec![FieldError {
                path: "data.email".to_string(),
                message: "must be an email address".to_string(),
            }])
        )
        .is_validation_error());
        assert!(!api_error(Some(500), Some(vec![])).is_validation_error());
    }

    #[test]
    fn test_validation_framing_in_crate_error() {
        let err: crate::Error = api_error(
            Some(400),
            Some(vec![FieldError {
                path: "data.email".to_string(),
                message: "must be an email address".to_string(),
            }]),
        )
        .into();
        assert!(err
            .to_string()
            .starts_with("subscriber API validation error (400)"));
    }

    #[test]
    fn test_plain_error_framing_in_crate_error() {
        let err: crate::Error = api_error(Some(502), None).into();
        assert_eq!(
            err.to_string(),
            "subscriber API error (502): email is invalid"
        );
    }

    #[test]
    fn test_statusless_error_framing() {
        let err: crate::Error = api_error(None, None).into();
        assert_eq!(err.to_string(), "subscriber API error: email is invalid");
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": "validation failed", "details": [{"path": "data.phone", "message": "too short"}]}"#,
        )
        .unwrap();
        assert_eq!(body.error.as_deref(), Some("validation failed"));
        assert_eq!(body.details.unwrap()[0].path, "data.phone");
    }
}
