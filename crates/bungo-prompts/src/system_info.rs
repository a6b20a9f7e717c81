use bungo_protocol::{AskRequest, ROLE_KEY, SYS_INFO_KEY};
use serde_json::{Map, Value};

use crate::roles::DEFAULT_ROLE_SELECTOR;

/// The caller's description of its environment, taken from `sys_info`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemInfo(Map<String, Value>);

impl SystemInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Operating system name. Older clients send it as `os`.
    pub fn platform(&self) -> Option<String> {
        self.text_field("platform").or_else(|| self.text_field("os"))
    }

    pub fn shell(&self) -> Option<String> {
        self.text_field("shell")
    }

    fn text_field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Read the `sys_info` mapping from the request context.
///
/// Missing context, a missing key or a non-object value all yield an empty
/// `SystemInfo`.
pub fn extract_system_info(request: &AskRequest) -> SystemInfo {
    let info = match request.context_value(SYS_INFO_KEY) {
        Some(Value::Object(fields)) => SystemInfo::new(fields.clone()),
        Some(other) => {
            tracing::debug!(value = %other, "ignoring non-object sys_info");
            SystemInfo::default()
        }
        None => SystemInfo::default(),
    };

    tracing::debug!(sys_info = ?info.as_map(), "extracted system info");
    info
}

/// Read the role selector from the request context, defaulting to `"0"`.
///
/// Numeric selectors are accepted and rendered in decimal, so `2` and `"2"`
/// select the same role.
pub fn resolve_role_selector(request: &AskRequest) -> String {
    match request.context_value(ROLE_KEY) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            tracing::debug!(value = %other, "unsupported role_key type, using default role");
            DEFAULT_ROLE_SELECTOR.to_string()
        }
        None => DEFAULT_ROLE_SELECTOR.to_string(),
    }
}
