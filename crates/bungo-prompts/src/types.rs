/// The built-in assistant personas a caller can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Default,
    Os,
    Shell,
    DescribeShell,
    Code,
}

impl RoleKind {
    /// Selector identifier callers send under `role_key`.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Default => "0",
            Self::Os => "1",
            Self::Shell => "2",
            Self::DescribeShell => "3",
            Self::Code => "4",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Os => "os",
            Self::Shell => "shell",
            Self::DescribeShell => "describe_shell",
            Self::Code => "code",
        }
    }
}

/// A role prompt with optional `{platform}` and `{shell}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTemplate {
    pub kind: RoleKind,
    pub text: &'static str,
}

impl RoleTemplate {
    pub const fn new(kind: RoleKind, text: &'static str) -> Self {
        Self { kind, text }
    }

    /// Substitute `{platform}` and `{shell}` in a single pass, so values that
    /// themselves look like placeholders are inserted verbatim.
    pub fn render(&self, platform: &str, shell: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + platform.len() + shell.len());
        let mut rest = self.text;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{platform}") {
                out.push_str(platform);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{shell}") {
                out.push_str(shell);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}
