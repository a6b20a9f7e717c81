use std::collections::HashMap;

use crate::types::{RoleKind, RoleTemplate};

/// Selector used when the caller does not pick a role.
pub const DEFAULT_ROLE_SELECTOR: &str = "0";

pub const DEFAULT_ROLE: &str = r#"You are a helpful assistant wit programming and system administration background.
Provide short responses in about 100 words, unless you are specifically asked for more details
"#;

pub const OS_ROLE: &str = r#"You are programming and system administration assistant.
You are managing {platform} operating system with {shell} shell.
Provide short responses in about 100 words, unless you are specifically asked for more details.
If you need to store any data, assume it will be stored in the conversation.
APPLY MARKDOWN formatting when possible."#;

pub const SHELL_ROLE: &str = r#"You are a shell generator.
Provide only {shell} commands for {platform} without any description.
If there is a lack of details, provide most logical solution.
Ensure the output is a valid shell command.
If multiple steps required try to combine them together using &&.
Provide only plain text without Markdown formatting.
Do not provide markdown formatting such as ```.
"#;

pub const DESCRIBE_SHELL_ROLE: &str = r#"You are a shell describer.
Provide a terse, single sentence description of the given shell command.
Describe each argument and option of the command.
Provide short responses in about 80 words.
APPLY MARKDOWN formatting when possible."#;

pub const CODE_ROLE: &str = r#"You are a code generator.
Provide only code as output without any description.
Provide only code in plain text format without Markdown formatting.
Do not include symbols such as ``` or ```python.
If there is a lack of details, provide most logical solution.
You are not allowed to ask for more details.
For example if the prompt is "Hello world Python", you should return "print('Hello world')"."#;

/// Fixed table of role prompts keyed by selector.
///
/// Built once at start-up and shared read-only; there is no way to mutate a
/// catalog after construction.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: HashMap<&'static str, RoleTemplate>,
}

impl RoleCatalog {
    pub fn builtin() -> Self {
        let roles = [
            RoleTemplate::new(RoleKind::Default, DEFAULT_ROLE),
            RoleTemplate::new(RoleKind::Os, OS_ROLE),
            RoleTemplate::new(RoleKind::Shell, SHELL_ROLE),
            RoleTemplate::new(RoleKind::DescribeShell, DESCRIBE_SHELL_ROLE),
            RoleTemplate::new(RoleKind::Code, CODE_ROLE),
        ]
        .into_iter()
        .map(|template| (template.kind.selector(), template))
        .collect();

        Self { roles }
    }

    pub fn get(&self, selector: &str) -> Option<&RoleTemplate> {
        self.roles.get(selector)
    }

    pub fn default_role(&self) -> &'static str {
        self.roles
            .get(DEFAULT_ROLE_SELECTOR)
            .map(|template| template.text)
            .unwrap_or(DEFAULT_ROLE)
    }

    /// Selectors in ascending order.
    pub fn selectors(&self) -> Vec<&'static str> {
        let mut selectors: Vec<_> = self.roles.keys().copied().collect();
        selectors.sort_unstable();
        selectors
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
