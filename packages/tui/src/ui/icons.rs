/// Glyph rendered in front of a section title
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "vault" => "▣",
        "terminal" => "❯",
        "add" => "+",
        "save" => "⎘",
        "edit" | "editAlt" => "✎",
        "delete" => "✗",
        "close" => "×",
        "confirm" => "✓",
        "copy" => "⧉",
        "refresh" => "↻",
        "folder" => "▸",
        "folderOpen" => "▾",
        "sections" => "☰",
        "grid" => "▦",
        "back" | "chevronLeft" => "‹",
        "forward" | "chevronRight" => "›",
        "chevronUp" => "˄",
        "chevronDown" => "˅",
        "search" => "⌕",
        "info" => "ℹ",
        "help" => "?",
        "warning" => "⚠",
        "eye" => "◉",
        "eyeOff" => "◌",
        "lock" => "⚿",
        "unlock" => "⚷",
        "play" => "▶",
        "pause" => "⏸",
        "stop" => "■",
        "bug" => "☣",
        "shield" => "⛨",
        "cpu" => "⚙",
        "database" => "⛁",
        "network" => "⇄",
        "globe" => "◍",
        "wifi" => "≋",
        "file" => "▤",
        "fileText" => "≣",
        "download" => "↓",
        "upload" => "↑",
        "star" => "★",
        "heart" => "♥",
        "zap" => "ϟ",
        _ => "❯",
    }
}
