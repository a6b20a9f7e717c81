//! Inbound ask request

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Message;

/// Request-context key carrying the caller's system information.
pub const SYS_INFO_KEY: &str = "sys_info";

/// Request-context key carrying the role selector.
pub const ROLE_KEY: &str = "role_key";

/// Free-form caller metadata attached to a request.
pub type RequestContext = Map<String, Value>;

/// Body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<RequestContext>,
}

impl AskRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            request_context: None,
        }
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.request_context = Some(context);
        self
    }

    /// Look up a key in the request context, if any context was supplied.
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.request_context.as_ref().and_then(|ctx| ctx.get(key))
    }
}
