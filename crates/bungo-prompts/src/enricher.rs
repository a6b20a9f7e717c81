use bungo_protocol::{AskRequest, Message, SYS_INFO_KEY};
use serde_json::Value;

use crate::roles::RoleCatalog;
use crate::system_info::{extract_system_info, resolve_role_selector, SystemInfo};

/// A conversation is on its first turn when it holds exactly a preamble and
/// one user message.
pub fn is_first_turn(messages: &[Message]) -> bool {
    messages.len() == 2
}

/// Text block describing the caller's environment.
pub fn format_system_info_block(info: &SystemInfo) -> String {
    let serialized = Value::Object(info.as_map().clone());
    format!("\nHere is information about my computer:\n {SYS_INFO_KEY}: {serialized}\n")
}

/// Append role text and, on the first turn, the system-info block to the
/// first message. Message count, order and roles are left alone, and a first
/// message without string content is not touched.
pub fn apply(request: &mut AskRequest, info: &SystemInfo, role_text: &str) {
    let first_turn = is_first_turn(&request.messages);

    let Some(first) = request.messages.first_mut() else {
        tracing::debug!("no messages to enrich");
        return;
    };

    if first.text().is_none() {
        tracing::debug!("first message content is not text, skipping enrichment");
        return;
    }

    if !role_text.is_empty() {
        first.append_content(role_text);
    }

    if first_turn && !info.is_empty() {
        first.append_content(&format_system_info_block(info));
    }
}

/// Decides what context to inject into an inbound request.
///
/// Holds a borrowed, read-only role catalog; construct one per request.
#[derive(Debug, Clone, Copy)]
pub struct ContextEnricher<'a> {
    catalog: &'a RoleCatalog,
}

impl<'a> ContextEnricher<'a> {
    pub fn new(catalog: &'a RoleCatalog) -> Self {
        Self { catalog }
    }

    /// Render the role prompt for `selector`.
    ///
    /// Unknown selectors produce an empty string. Any role needs both a
    /// platform and a shell; without them the default role is used instead.
    pub fn render_role(&self, selector: &str, info: &SystemInfo) -> String {
        let Some(template) = self.catalog.get(selector) else {
            tracing::warn!(
                selector,
                known = ?self.catalog.selectors(),
                "unknown role selector, no role text applied"
            );
            return String::new();
        };

        match (info.platform(), info.shell()) {
            (Some(platform), Some(shell)) => template.render(&platform, &shell),
            _ => {
                tracing::debug!(
                    role = template.kind.as_str(),
                    "platform or shell missing, falling back to default role"
                );
                self.catalog.default_role().to_string()
            }
        }
    }

    /// Run the full enrichment for one request.
    ///
    /// Requests without any request context are forwarded untouched.
    pub fn enrich(&self, request: &mut AskRequest) {
        if request.request_context.is_none() {
            tracing::debug!("no request context, skipping enrichment");
            return;
        }

        let info = extract_system_info(request);
        let selector = resolve_role_selector(request);
        let role_text = self.render_role(&selector, &info);

        tracing::debug!(
            selector = %selector,
            role_applied = !role_text.is_empty(),
            first_turn = is_first_turn(&request.messages),
            has_sys_info = !info.is_empty(),
            "enriching request"
        );

        apply(request, &info, &role_text);
    }
}
