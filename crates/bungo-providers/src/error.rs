//! Provider error types

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Details of an error response the upstream API sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub status: u16,
    pub message: String,
    pub error_type: Option<String>,
    pub code: Option<String>,
}

impl ApiErrorDetail {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_type: None,
            code: None,
        }
    }
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match reason_phrase(self.status) {
            Some(reason) => write!(f, "{} {} - {}", self.status, reason, self.message),
            None => write!(f, "{} - {}", self.status, self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("bad request: {0}")]
    BadRequest(ApiErrorDetail),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(ApiErrorDetail),

    #[error("permission denied: {0}")]
    PermissionDenied(ApiErrorDetail),

    #[error("resource not found: {0}")]
    NotFound(ApiErrorDetail),

    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(ApiErrorDetail),

    #[error("rate limit exceeded: {0}")]
    RateLimited(ApiErrorDetail),

    #[error("connection error: {cause}")]
    Connection { cause: String },

    #[error("upstream internal error: {cause}")]
    InternalServer { status: u16, cause: String },

    #[error("unexpected upstream status: {0}")]
    UnexpectedStatus(ApiErrorDetail),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Error for an upstream 5xx response.
    pub fn internal_server(status: u16) -> Self {
        let cause = match reason_phrase(status) {
            Some(reason) => format!("upstream responded with {status} {reason}"),
            None => format!("upstream responded with {status}"),
        };
        Self::InternalServer { status, cause }
    }

    /// Short stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::AuthenticationFailed(_) => "authentication",
            Self::PermissionDenied(_) => "permission_denied",
            Self::NotFound(_) => "not_found",
            Self::UnprocessableEntity(_) => "unprocessable_entity",
            Self::RateLimited(_) => "rate_limited",
            Self::Connection { .. } => "connection",
            Self::InternalServer { .. } => "internal_server",
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Configuration(_) => "configuration",
        }
    }

    /// HTTP status the upstream answered with, when it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(d)
            | Self::AuthenticationFailed(d)
            | Self::PermissionDenied(d)
            | Self::NotFound(d)
            | Self::UnprocessableEntity(d)
            | Self::RateLimited(d)
            | Self::UnexpectedStatus(d) => Some(d.status),
            Self::InternalServer { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(error_chain(&err))
        } else if err.is_builder() {
            Self::Configuration(error_chain(&err))
        } else {
            // Timeouts, refused connections, DNS and TLS failures.
            Self::Connection {
                cause: error_chain(&err),
            }
        }
    }
}

/// Render an error and its sources as one line, skipping sources whose text
/// is already part of the previous message.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}

fn reason_phrase(status: u16) -> Option<&'static str> {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
}
