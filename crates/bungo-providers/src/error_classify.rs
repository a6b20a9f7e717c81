//! Upstream error classification
//!
//! Error bodies come in the nested `{"error": {"message": "...", "type": "...", "code": "..."}}`
//! form, occasionally flat, and sometimes as plain text from a proxy in front
//! of the API. The status code alone decides the `ProviderError` variant; the
//! body only supplies the message.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiErrorDetail, ProviderError};

#[derive(Debug, Deserialize)]
struct FlatErrorResponse {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NestedErrorResponse {
    error: NestedError,
}

#[derive(Debug, Deserialize)]
struct NestedError {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<Value>,
    param: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorBodyInfo {
    pub message: String,
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub param: Option<String>,
}

// Codes are usually strings but some gateways send numbers.
fn code_text(code: Option<Value>) -> Option<String> {
    match code? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Parse an error body, trying nested format first then flat
pub fn parse_error_body(body: &str) -> ErrorBodyInfo {
    if let Ok(nested) = serde_json::from_str::<NestedErrorResponse>(body) {
        return ErrorBodyInfo {
            message: nested.error.message.unwrap_or_else(|| body.to_string()),
            error_type: nested.error.error_type,
            code: code_text(nested.error.code),
            param: nested.error.param,
        };
    }

    if let Ok(flat) = serde_json::from_str::<FlatErrorResponse>(body) {
        if flat.message.is_some() || flat.error_type.is_some() || flat.code.is_some() {
            return ErrorBodyInfo {
                message: flat.message.unwrap_or_else(|| body.to_string()),
                error_type: flat.error_type,
                code: code_text(flat.code),
                param: None,
            };
        }
    }

    ErrorBodyInfo {
        message: body.trim().to_string(),
        ..Default::default()
    }
}

/// Classify an upstream error response by status code.
///
/// 5xx bodies are not carried in the error; callers log them.
pub fn classify_error(status: u16, body: &str) -> ProviderError {
    if status >= 500 {
        return ProviderError::internal_server(status);
    }

    let info = parse_error_body(body);
    let detail = ApiErrorDetail {
        status,
        message: info.message,
        error_type: info.error_type,
        code: info.code,
    };

    match status {
        400 => ProviderError::BadRequest(detail),
        401 => ProviderError::AuthenticationFailed(detail),
        403 => ProviderError::PermissionDenied(detail),
        404 => ProviderError::NotFound(detail),
        422 => ProviderError::UnprocessableEntity(detail),
        429 => ProviderError::RateLimited(detail),
        _ => ProviderError::UnexpectedStatus(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_error() {
        let body = r#"{"error": {"message": "Rate limit exceeded", "type": "rate_limit_error", "code": "rate_limit_exceeded"}}"#;
        let info = parse_error_body(body);
        assert_eq!(info.message, "Rate limit exceeded");
        assert_eq!(info.error_type.as_deref(), Some("rate_limit_error"));
        assert_eq!(info.code.as_deref(), Some("rate_limit_exceeded"));
    }

    #[test]
    fn test_parse_flat_error() {
        let body = r#"{"message": "Invalid API key", "type": "invalid_request_error", "code": "invalid_api_key"}"#;
        let info = parse_error_body(body);
        assert_eq!(info.message, "Invalid API key");
        assert_eq!(info.code.as_deref(), Some("invalid_api_key"));
    }

    #[test]
    fn test_parse_numeric_code() {
        let info = parse_error_body(r#"{"error": {"message": "nope", "code": 42}}"#);
        assert_eq!(info.code.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_raw_body() {
        let info = parse_error_body("Something went wrong\n");
        assert_eq!(info.message, "Something went wrong");
        assert!(info.code.is_none());
    }

    #[test]
    fn test_classify_client_errors_by_status() {
        let body = r#"{"error": {"message": "boom"}}"#;
        assert!(matches!(classify_error(400, body), ProviderError::BadRequest(_)));
        assert!(matches!(
            classify_error(401, body),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            classify_error(403, body),
            ProviderError::PermissionDenied(_)
        ));
        assert!(matches!(classify_error(404, body), ProviderError::NotFound(_)));
        assert!(matches!(
            classify_error(422, body),
            ProviderError::UnprocessableEntity(_)
        ));
        assert!(matches!(classify_error(429, body), ProviderError::RateLimited(_)));
    }

    #[test]
    fn test_classify_keeps_status_and_message() {
        let err = classify_error(
            401,
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}"#,
        );
        let ProviderError::AuthenticationFailed(detail) = err else {
            panic!("expected authentication error");
        };
        assert_eq!(detail.status, 401);
        assert_eq!(detail.message, "Incorrect API key provided");
        assert_eq!(detail.code.as_deref(), Some("invalid_api_key"));
    }

    #[test]
    fn test_classify_server_errors() {
        for status in [500, 502, 503, 504] {
            assert!(matches!(
                classify_error(status, "upstream down"),
                ProviderError::InternalServer { status: s, .. } if s == status
            ));
        }
    }

    #[test]
    fn test_classify_unrecognized_status() {
        let err = classify_error(409, r#"{"error": {"message": "conflict"}}"#);
        assert!(matches!(err, ProviderError::UnexpectedStatus(ref d) if d.status == 409));
    }
}
