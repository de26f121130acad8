// ABOUTME: Domain constants for Command Vault
// ABOUTME: Field bounds, defaults, the section icon set, and known snippet languages

/// Name given to the workspace seeded into an empty store
pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";

/// Language tag used when a command is created without one
pub const DEFAULT_LANGUAGE: &str = "bash";

/// Icon used when a section is created without one
pub const DEFAULT_SECTION_ICON: &str = "terminal";

pub const WORKSPACE_NAME_MAX: usize = 64;
pub const SECTION_TITLE_MAX: usize = 64;
pub const COMMAND_TITLE_MAX: usize = 80;
pub const DESCRIPTION_MAX: usize = 800;
pub const LANGUAGE_MAX: usize = 24;
pub const COMMAND_MAX: usize = 8000;

/// Symbolic icon identifiers a section may carry
pub const SECTION_ICONS: &[&str] = &[
    "vault",
    "terminal",
    "add",
    "save",
    "edit",
    "editAlt",
    "delete",
    "close",
    "confirm",
    "copy",
    "refresh",
    "folder",
    "folderOpen",
    "sections",
    "grid",
    "back",
    "forward",
    "chevronLeft",
    "chevronRight",
    "chevronUp",
    "chevronDown",
    "search",
    "info",
    "help",
    "warning",
    "eye",
    "eyeOff",
    "lock",
    "unlock",
    "play",
    "pause",
    "stop",
    "bug",
    "shield",
    "cpu",
    "database",
    "network",
    "globe",
    "wifi",
    "file",
    "fileText",
    "download",
    "upload",
    "star",
    "heart",
    "zap",
];

/// Languages offered by the command editor as (tag, display label)
pub const LANGUAGES: &[(&str, &str)] = &[
    ("bash", "Bash"),
    ("powershell", "PowerShell"),
    ("python", "Python"),
    ("csharp", "C#"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("java", "Java"),
    ("html", "HTML"),
    ("sql", "SQL"),
];

/// Check whether an icon identifier belongs to the section icon set
pub fn is_known_icon(icon: &str) -> bool {
    SECTION_ICONS.contains(&icon)
}

/// Display label for a language tag, if it is one of the editor languages
pub fn language_label(tag: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(id, _)| *id == tag)
        .map(|(_, label)| *label)
}
