//! Upstream fault translation.
//!
//! Maps a classified [`ProviderError`] to the status code and message the
//! caller sees. Kinds without a mapping are handed back unchanged.

use bungo_providers::{ApiErrorDetail, ProviderError};
use thiserror::Error;

/// Caller-facing failure produced from an upstream error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UpstreamFailure {
    pub status: u16,
    pub message: String,
}

impl UpstreamFailure {
    fn new(status: u16, message: String) -> Self {
        Self { status, message }
    }

    fn denied(status: u16, reason: &str, detail: &ApiErrorDetail) -> Self {
        Self::new(
            status,
            format!("OpenAI Request denied due to {reason}: {detail}"),
        )
    }
}

pub fn translate(err: ProviderError) -> Result<UpstreamFailure, ProviderError> {
    let failure = match err {
        ProviderError::BadRequest(d) => UpstreamFailure::denied(500, "bad request", &d),
        ProviderError::AuthenticationFailed(d) => {
            UpstreamFailure::denied(500, "authentication issue", &d)
        }
        ProviderError::PermissionDenied(d) => UpstreamFailure::denied(500, "permission denied", &d),
        ProviderError::NotFound(d) => UpstreamFailure::denied(500, "resource not found", &d),
        ProviderError::UnprocessableEntity(d) => {
            UpstreamFailure::denied(522, "unprocessable entity", &d)
        }
        ProviderError::RateLimited(d) => UpstreamFailure::denied(529, "hitting rate limit", &d),
        ProviderError::Connection { cause } => UpstreamFailure::new(
            500,
            format!("The OpenAI server could not be reached: {cause}"),
        ),
        ProviderError::InternalServer { cause, .. } => UpstreamFailure::new(
            502,
            format!("The OpenAI server had an internal error: {cause}"),
        ),
        other => return Err(other),
    };
    Ok(failure)
}
