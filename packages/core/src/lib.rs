// ABOUTME: Core types, validation, and utilities for Command Vault
// ABOUTME: Foundational package shared by storage, API, and the terminal client

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    CommandCreateInput, CommandEntry, CommandUpdateInput, Section, SectionCreateInput,
    SectionUpdateInput, Workspace, WorkspaceInput,
};

// Re-export constants
pub use constants::{
    is_known_icon, language_label, DEFAULT_LANGUAGE, DEFAULT_SECTION_ICON,
    DEFAULT_WORKSPACE_NAME, LANGUAGES, SECTION_ICONS,
};

// Re-export utilities
pub use utils::{format_timestamp, generate_id, timestamp_now};

// Re-export validation
pub use validation::{
    normalize_language, parse_command_create, parse_command_update, parse_section_create,
    parse_section_update, parse_workspace_input, ValidationError, ValidationIssue,
};
