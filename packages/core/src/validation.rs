// ABOUTME: Request payload validation for workspaces, sections, and commands
// ABOUTME: Collects every field violation into one error and returns normalized input

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::{
    is_known_icon, COMMAND_MAX, COMMAND_TITLE_MAX, DEFAULT_LANGUAGE, DEFAULT_SECTION_ICON,
    DESCRIPTION_MAX, LANGUAGE_MAX, SECTION_TITLE_MAX, WORKSPACE_NAME_MAX,
};
use crate::types::{
    CommandCreateInput, CommandUpdateInput, SectionCreateInput, SectionUpdateInput,
    WorkspaceInput,
};

/// Path reported when the payload itself has the wrong shape
const ROOT_PATH: &str = "(root)";

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

/// All violations found in one payload, rendered as `path: message; path: message`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(path: &str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.to_string(),
                message: message.into(),
            }],
        }
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.path, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

enum Position {
    Valid(i64),
    Negative,
    TooLarge,
    Fractional,
}

/// Integral floats such as `2.0` are accepted; anything outside `i64` is out of range
fn position_value(n: &serde_json::Number) -> Position {
    if let Some(value) = n.as_i64() {
        return if value >= 0 {
            Position::Valid(value)
        } else {
            Position::Negative
        };
    }
    if n.as_u64().is_some() {
        return Position::TooLarge;
    }

    match n.as_f64() {
        Some(f) if f.fract() != 0.0 => Position::Fractional,
        Some(f) if f < 0.0 => Position::Negative,
        Some(f) if f < i64::MAX as f64 => Position::Valid(f as i64),
        Some(_) => Position::TooLarge,
        None => Position::Fractional,
    }
}

/// Reads typed fields out of a JSON object, recording violations as it goes
struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    issues: Vec<ValidationIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Value) -> Self {
        let mut reader = Self {
            object: None,
            issues: Vec::new(),
        };

        match body {
            Value::Object(map) => reader.object = Some(map),
            other => reader.push(
                ROOT_PATH,
                format!("Expected object, received {}", type_name(other)),
            ),
        }

        reader
    }

    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    /// Raw field value; `None` when absent or when the payload is not an object
    fn field(&self, name: &str) -> Option<&'a Value> {
        self.object.and_then(|map| map.get(name))
    }

    fn check_length(&mut self, name: &str, value: &str, min: usize, max: usize) -> bool {
        let length = value.chars().count();
        if length < min {
            self.push(name, format!("Must contain at least {} character(s)", min));
            return false;
        }
        if length > max {
            self.push(name, format!("Must contain at most {} character(s)", max));
            return false;
        }
        true
    }

    fn string(&mut self, name: &str, min: usize, max: usize, required: bool) -> Option<String> {
        if self.object.is_none() {
            return None;
        }

        match self.field(name) {
            None => {
                if required {
                    self.push(name, "Required");
                }
                None
            }
            Some(Value::String(s)) => {
                if self.check_length(name, s, min, max) {
                    Some(s.clone())
                } else {
                    None
                }
            }
            Some(other) => {
                self.push(
                    name,
                    format!("Expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn required_string(&mut self, name: &str, min: usize, max: usize) -> String {
        self.string(name, min, max, true).unwrap_or_default()
    }

    fn optional_string(&mut self, name: &str, min: usize, max: usize) -> Option<String> {
        self.string(name, min, max, false)
    }

    fn icon(&mut self, required: bool) -> Option<String> {
        let icon = self.string("icon", 1, usize::MAX, required)?;
        if is_known_icon(&icon) {
            Some(icon)
        } else {
            self.push("icon", format!("Unknown icon '{}'", icon));
            None
        }
    }

    fn position(&mut self, required: bool) -> Option<i64> {
        if self.object.is_none() {
            return None;
        }

        let name = "position";
        match self.field(name) {
            None => {
                if required {
                    self.push(name, "Required");
                }
                None
            }
            Some(Value::Number(n)) => match position_value(n) {
                Position::Valid(value) => Some(value),
                Position::Negative => {
                    self.push(name, "Number must be greater than or equal to 0");
                    None
                }
                Position::TooLarge => {
                    self.push(
                        name,
                        format!("Number must be less than or equal to {}", i64::MAX),
                    );
                    None
                }
                Position::Fractional => {
                    self.push(name, "Expected integer, received float");
                    None
                }
            },
            Some(other) => {
                self.push(
                    name,
                    format!("Expected number, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

/// Lowercase a language tag for storage
pub fn normalize_language(language: &str) -> String {
    language.to_lowercase()
}

/// Validate the body of a workspace create or rename
pub fn parse_workspace_input(body: &Value) -> Result<WorkspaceInput, ValidationError> {
    let mut reader = FieldReader::new(body);
    let name = reader.required_string("name", 1, WORKSPACE_NAME_MAX);
    reader.finish(WorkspaceInput { name })
}

/// Validate the body of a section create, filling in the default icon and position
pub fn parse_section_create(body: &Value) -> Result<SectionCreateInput, ValidationError> {
    let mut reader = FieldReader::new(body);

    let workspace_id = reader.required_string("workspace_id", 1, usize::MAX);
    let title = reader.required_string("title", 1, SECTION_TITLE_MAX);
    let icon = reader
        .icon(false)
        .unwrap_or_else(|| DEFAULT_SECTION_ICON.to_string());
    let position = reader.position(false).unwrap_or(0);

    reader.finish(SectionCreateInput {
        workspace_id,
        title,
        icon,
        position,
    })
}

/// Validate the body of a section update; every editable field is required
pub fn parse_section_update(body: &Value) -> Result<SectionUpdateInput, ValidationError> {
    let mut reader = FieldReader::new(body);

    let title = reader.required_string("title", 1, SECTION_TITLE_MAX);
    let icon = reader.icon(true).unwrap_or_default();
    let position = reader.position(true).unwrap_or(0);

    reader.finish(SectionUpdateInput {
        title,
        icon,
        position,
    })
}

/// Validate the body of a command create, applying defaults and lowercasing the language
pub fn parse_command_create(body: &Value) -> Result<CommandCreateInput, ValidationError> {
    let mut reader = FieldReader::new(body);

    let section_id = reader.required_string("section_id", 1, usize::MAX);
    let title = reader.required_string("title", 1, COMMAND_TITLE_MAX);
    let description = reader
        .optional_string("description", 0, DESCRIPTION_MAX)
        .unwrap_or_default();
    let language = reader
        .optional_string("language", 1, LANGUAGE_MAX)
        .map(|l| normalize_language(&l))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let command = reader.required_string("command", 1, COMMAND_MAX);
    let position = reader.position(false).unwrap_or(0);

    reader.finish(CommandCreateInput {
        section_id,
        title,
        description,
        language,
        command,
        position,
    })
}

/// Validate the body of a command update; every editable field is required
pub fn parse_command_update(body: &Value) -> Result<CommandUpdateInput, ValidationError> {
    let mut reader = FieldReader::new(body);

    let title = reader.required_string("title", 1, COMMAND_TITLE_MAX);
    let description = reader.required_string("description", 0, DESCRIPTION_MAX);
    let language = normalize_language(&reader.required_string("language", 1, LANGUAGE_MAX));
    let command = reader.required_string("command", 1, COMMAND_MAX);
    let position = reader.position(true).unwrap_or(0);

    reader.finish(CommandUpdateInput {
        title,
        description,
        language,
        command,
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_workspace_input_valid() {
        let input = parse_workspace_input(&json!({ "name": "Ops" })).unwrap();
        assert_eq!(input.name, "Ops");
    }

    #[test]
    fn test_workspace_input_missing_name() {
        let err = parse_workspace_input(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "name: Required");
    }

    #[test]
    fn test_workspace_input_name_bounds() {
        assert!(parse_workspace_input(&json!({ "name": "" })).is_err());
        assert!(parse_workspace_input(&json!({ "name": "a".repeat(64) })).is_ok());
        assert!(parse_workspace_input(&json!({ "name": "a".repeat(65) })).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 64 multi-byte characters are within bounds
        let name = "é".repeat(64);
        assert!(parse_workspace_input(&json!({ "name": name })).is_ok());
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = parse_workspace_input(&json!(["Ops"])).unwrap_err();
        assert_eq!(err.to_string(), "(root): Expected object, received array");
    }

    #[test]
    fn test_wrong_type_reported() {
        let err = parse_workspace_input(&json!({ "name": 42 })).unwrap_err();
        assert_eq!(err.to_string(), "name: Expected string, received number");
    }

    #[test]
    fn test_section_create_defaults() {
        let input = parse_section_create(&json!({
            "workspace_id": "ws-1",
            "title": "Docker"
        }))
        .unwrap();

        assert_eq!(input.icon, DEFAULT_SECTION_ICON);
        assert_eq!(input.position, 0);
    }

    #[test]
    fn test_section_create_unknown_icon() {
        let err = parse_section_create(&json!({
            "workspace_id": "ws-1",
            "title": "Docker",
            "icon": "rocket"
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "icon: Unknown icon 'rocket'");
    }

    #[test]
    fn test_section_update_requires_all_fields() {
        let err = parse_section_update(&json!({ "title": "Docker" })).unwrap_err();
        assert_eq!(err.to_string(), "icon: Required; position: Required");
    }

    #[test]
    fn test_position_rules() {
        let base = |position: Value| {
            json!({ "title": "Git", "icon": "folder", "position": position })
        };

        assert_eq!(parse_section_update(&base(json!(3))).unwrap().position, 3);
        assert_eq!(parse_section_update(&base(json!(2.0))).unwrap().position, 2);

        let negative = parse_section_update(&base(json!(-1))).unwrap_err();
        assert_eq!(
            negative.to_string(),
            "position: Number must be greater than or equal to 0"
        );

        let fractional = parse_section_update(&base(json!(1.5))).unwrap_err();
        assert_eq!(
            fractional.to_string(),
            "position: Expected integer, received float"
        );

        let text = parse_section_update(&base(json!("1"))).unwrap_err();
        assert_eq!(text.to_string(), "position: Expected number, received string");
    }

    #[test]
    fn test_position_out_of_range() {
        let too_large = "position: Number must be less than or equal to 9223372036854775807";

        for raw in ["18446744073709551615", "1e20", "9223372036854775808"] {
            let body: Value = serde_json::from_str(&format!(
                r#"{{ "title": "Git", "icon": "folder", "position": {} }}"#,
                raw
            ))
            .unwrap();
            let err = parse_section_update(&body).unwrap_err();
            assert_eq!(err.to_string(), too_large, "position {}", raw);
        }

        let body = json!({ "title": "Git", "icon": "folder", "position": -1e20 });
        assert_eq!(
            parse_section_update(&body).unwrap_err().to_string(),
            "position: Number must be greater than or equal to 0"
        );
    }

    #[test]
    fn test_command_create_normalizes_language() {
        let input = parse_command_create(&json!({
            "section_id": "sec-1",
            "title": "List files",
            "language": "Bash",
            "command": "ls -la"
        }))
        .unwrap();

        assert_eq!(input.language, "bash");
        assert_eq!(input.description, "");
        assert_eq!(input.position, 0);
    }

    #[test]
    fn test_command_create_default_language() {
        let input = parse_command_create(&json!({
            "section_id": "sec-1",
            "title": "List files",
            "command": "ls"
        }))
        .unwrap();

        assert_eq!(input.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_command_create_empty_command_rejected() {
        let err = parse_command_create(&json!({
            "section_id": "sec-1",
            "title": "Nothing",
            "command": ""
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "command: Must contain at least 1 character(s)");
    }

    #[test]
    fn test_command_create_aggregates_all_issues() {
        let err = parse_command_create(&json!({
            "title": "",
            "description": "d".repeat(801),
            "command": "c".repeat(8001),
            "position": -2
        }))
        .unwrap_err();

        let paths: Vec<&str> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["section_id", "title", "description", "command", "position"]
        );
        assert_eq!(err.to_string().matches("; ").count(), 4);
    }

    #[test]
    fn test_command_update_allows_empty_description() {
        let input = parse_command_update(&json!({
            "title": "Status",
            "description": "",
            "language": "PowerShell",
            "command": "Get-Service",
            "position": 1
        }))
        .unwrap();

        assert_eq!(input.description, "");
        assert_eq!(input.language, "powershell");
    }

    #[test]
    fn test_command_update_requires_description() {
        let err = parse_command_update(&json!({
            "title": "Status",
            "language": "bash",
            "command": "systemctl status",
            "position": 0
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "description: Required");
    }

    #[test]
    fn test_null_is_a_type_error() {
        let err = parse_command_create(&json!({
            "section_id": "sec-1",
            "title": "t",
            "command": "c",
            "language": null
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "language: Expected string, received null");
    }
}
