pub mod enricher;
pub mod roles;
pub mod system_info;
pub mod types;

pub use enricher::{apply, format_system_info_block, is_first_turn, ContextEnricher};
pub use roles::{
    RoleCatalog, CODE_ROLE, DEFAULT_ROLE, DEFAULT_ROLE_SELECTOR, DESCRIBE_SHELL_ROLE, OS_ROLE,
    SHELL_ROLE,
};
pub use system_info::{extract_system_info, resolve_role_selector, SystemInfo};
pub use types::{RoleKind, RoleTemplate};
