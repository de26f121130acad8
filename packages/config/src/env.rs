// ABOUTME: Environment variable reading helpers
// ABOUTME: Blank values count as unset so `.env` placeholders fall back to defaults

/// Read a string environment variable, treating empty or whitespace-only values as unset
pub fn optional_env(var_name: &str) -> Option<String> {
    std::env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
