//! Message types for upstream chat completion

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// A message in the conversation.
///
/// The role is kept as the caller's free-form label and is never rewritten.
/// `content` is kept exactly as received: a string, a list of parts, an
/// explicit `null`, or absent (`None`). Fields this relay does not interpret
/// (`name`, `tool_calls`, ...) are carried in `extra` so they reach the
/// upstream API untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Only runs when the field exists, so an explicit `null` stays `Some(Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(Value::String(content.into())),
            extra: Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }

    /// Text content, if the content is a plain string.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Value::as_str)
    }

    /// Append text to a string content. Returns `false`, leaving the message
    /// untouched, when the content is absent or not a string.
    pub fn append_content(&mut self, text: &str) -> bool {
        match self.content.as_mut() {
            Some(Value::String(content)) => {
                content.push_str(text);
                true
            }
            _ => false,
        }
    }
}
