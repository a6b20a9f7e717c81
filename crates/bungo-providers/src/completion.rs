//! Successful chat-completion response

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::{ProviderError, ProviderResult};

/// A chat-completion response body exactly as the upstream sent it.
///
/// The body is known to be valid JSON but is never re-serialized, so key
/// order and formatting survive the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    body: String,
}

impl ChatCompletion {
    pub fn from_body(body: impl Into<String>) -> ProviderResult<Self> {
        let body = body.into();
        serde_json::from_str::<IgnoredAny>(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("response is not JSON: {e}")))?;
        Ok(Self { body })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Parse the body into a JSON value.
    pub fn json(&self) -> ProviderResult<Value> {
        serde_json::from_str(&self.body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}
