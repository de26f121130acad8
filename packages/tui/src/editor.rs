use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cmdvault_core::{
    CommandEntry, Section, Workspace, DEFAULT_LANGUAGE, DEFAULT_SECTION_ICON, LANGUAGES,
    SECTION_ICONS,
};

use crate::controller::{CommandDraft, SectionDraft};
use crate::input::InputBuffer;

/// Title used when a workspace or section is saved with a blank name
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq)]
pub enum EditorTarget {
    Workspace { id: Option<String> },
    Section { id: Option<String> },
    Command { id: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    /// Fixed options as `(value, label)` pairs
    Choice(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub buffer: InputBuffer,
    pub choice: usize,
    /// Upper bound shown next to the field, in characters
    pub max_chars: Option<usize>,
}

impl EditorField {
    fn text(label: &'static str, value: &str, max_chars: usize) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            buffer: InputBuffer::with_content(value),
            choice: 0,
            max_chars: Some(max_chars),
        }
    }

    fn multiline(label: &'static str, value: &str, max_chars: usize) -> Self {
        Self {
            kind: FieldKind::Multiline,
            ..Self::text(label, value, max_chars)
        }
    }

    fn number(label: &'static str, value: i64) -> Self {
        Self {
            label,
            kind: FieldKind::Number,
            buffer: InputBuffer::with_content(value.to_string()),
            choice: 0,
            max_chars: None,
        }
    }

    fn choice(label: &'static str, options: Vec<(String, String)>, selected: &str) -> Self {
        let choice = options
            .iter()
            .position(|(value, _)| value == selected)
            .unwrap_or(0);
        Self {
            label,
            kind: FieldKind::Choice(options),
            buffer: InputBuffer::new(),
            choice,
            max_chars: None,
        }
    }

    /// Current value: the selected option for choices, the buffer text otherwise
    pub fn value(&self) -> String {
        match &self.kind {
            FieldKind::Choice(options) => options
                .get(self.choice)
                .map(|(value, _)| value.clone())
                .unwrap_or_default(),
            _ => self.buffer.content().to_string(),
        }
    }

    pub fn choice_label(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Choice(options) => options.get(self.choice).map(|(_, label)| label.as_str()),
            _ => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        if let FieldKind::Choice(options) = &self.kind {
            if options.is_empty() {
                return;
            }
            let len = options.len();
            self.choice = if forward {
                (self.choice + 1) % len
            } else {
                (self.choice + len - 1) % len
            };
        }
    }

    fn accepts(&self, ch: char) -> bool {
        match self.kind {
            FieldKind::Number => ch.is_ascii_digit() || ch == '-',
            FieldKind::Choice(_) => false,
            _ => true,
        }
    }
}

/// Validated-looking payload produced when the user submits the form
#[derive(Debug, Clone, PartialEq)]
pub enum EditorSubmission {
    Workspace { id: Option<String>, name: String },
    Section { id: Option<String>, draft: SectionDraft },
    Command { id: Option<String>, draft: CommandDraft },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Pending,
    Cancelled,
    Submitted(EditorSubmission),
}

#[derive(Debug, Clone)]
pub struct EditorForm {
    pub title: String,
    pub target: EditorTarget,
    pub fields: Vec<EditorField>,
    pub focused: usize,
}

impl EditorForm {
    pub fn new_workspace() -> Self {
        Self {
            title: "New workspace".to_string(),
            target: EditorTarget::Workspace { id: None },
            fields: vec![EditorField::text("Name", "", cmdvault_core::constants::WORKSPACE_NAME_MAX)],
            focused: 0,
        }
    }

    pub fn edit_workspace(workspace: &Workspace) -> Self {
        Self {
            title: "Rename workspace".to_string(),
            target: EditorTarget::Workspace {
                id: Some(workspace.id.clone()),
            },
            fields: vec![EditorField::text(
                "Name",
                &workspace.name,
                cmdvault_core::constants::WORKSPACE_NAME_MAX,
            )],
            focused: 0,
        }
    }

    pub fn new_section() -> Self {
        Self::section_form("New section", None, "", DEFAULT_SECTION_ICON, 0)
    }

    pub fn edit_section(section: &Section) -> Self {
        Self::section_form(
            "Edit section",
            Some(section.id.clone()),
            &section.title,
            &section.icon,
            section.position,
        )
    }

    fn section_form(
        title: &str,
        id: Option<String>,
        section_title: &str,
        icon: &str,
        position: i64,
    ) -> Self {
        let icons = SECTION_ICONS
            .iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();

        Self {
            title: title.to_string(),
            target: EditorTarget::Section { id },
            fields: vec![
                EditorField::text(
                    "Title",
                    section_title,
                    cmdvault_core::constants::SECTION_TITLE_MAX,
                ),
                EditorField::choice("Icon", icons, icon),
                EditorField::number("Position", position),
            ],
            focused: 0,
        }
    }

    pub fn new_command() -> Self {
        Self::command_form("New command", None, "", DEFAULT_LANGUAGE, 0, "", "")
    }

    pub fn edit_command(command: &CommandEntry) -> Self {
        Self::command_form(
            "Edit command",
            Some(command.id.clone()),
            &command.title,
            &command.language,
            command.position,
            &command.description,
            &command.command,
        )
    }

    fn command_form(
        title: &str,
        id: Option<String>,
        command_title: &str,
        language: &str,
        position: i64,
        description: &str,
        command: &str,
    ) -> Self {
        use cmdvault_core::constants::{COMMAND_MAX, COMMAND_TITLE_MAX, DESCRIPTION_MAX};

        let mut languages: Vec<(String, String)> = LANGUAGES
            .iter()
            .map(|(tag, label)| (tag.to_string(), label.to_string()))
            .collect();
        // Keep a stored tag selectable even when it is not one of the known languages
        if !languages.iter().any(|(tag, _)| tag == language) {
            languages.push((language.to_string(), language.to_string()));
        }

        Self {
            title: title.to_string(),
            target: EditorTarget::Command { id },
            fields: vec![
                EditorField::text("Title", command_title, COMMAND_TITLE_MAX),
                EditorField::choice("Language", languages, language),
                EditorField::number("Position", position),
                EditorField::multiline("Description", description, DESCRIPTION_MAX),
                EditorField::multiline("Command", command, COMMAND_MAX),
            ],
            focused: 0,
        }
    }

    pub fn focused_field(&self) -> Option<&EditorField> {
        self.fields.get(self.focused)
    }

    fn focused_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.focused)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn is_last_field(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }

    fn field_value(&self, label: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(EditorField::value)
            .unwrap_or_default()
    }

    fn position_value(&self) -> i64 {
        self.field_value("Position").trim().parse().unwrap_or(0)
    }

    /// Build the payload from the current field values
    pub fn submission(&self) -> EditorSubmission {
        match &self.target {
            EditorTarget::Workspace { id } => EditorSubmission::Workspace {
                id: id.clone(),
                name: or_untitled(&self.field_value("Name")),
            },
            EditorTarget::Section { id } => EditorSubmission::Section {
                id: id.clone(),
                draft: SectionDraft {
                    title: or_untitled(&self.field_value("Title")),
                    icon: self.field_value("Icon"),
                    position: self.position_value(),
                },
            },
            EditorTarget::Command { id } => EditorSubmission::Command {
                id: id.clone(),
                draft: CommandDraft {
                    title: self.field_value("Title").trim().to_string(),
                    description: self.field_value("Description"),
                    language: self.field_value("Language").trim().to_string(),
                    command: self.field_value("Command").trim().to_string(),
                    position: self.position_value(),
                },
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return EditorOutcome::Cancelled,
            KeyCode::Char('s') if ctrl => return EditorOutcome::Submitted(self.submission()),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Enter => {
                let multiline = matches!(
                    self.focused_field().map(|f| &f.kind),
                    Some(FieldKind::Multiline)
                );
                if multiline {
                    if let Some(field) = self.focused_field_mut() {
                        field.buffer.insert_char('\n');
                    }
                } else if self.is_last_field() {
                    return EditorOutcome::Submitted(self.submission());
                } else {
                    self.next_field();
                }
            }
            code => {
                if let Some(field) = self.focused_field_mut() {
                    edit_field(field, code, ctrl);
                }
            }
        }

        EditorOutcome::Pending
    }
}

fn edit_field(field: &mut EditorField, code: KeyCode, ctrl: bool) {
    if let FieldKind::Choice(_) = field.kind {
        match code {
            KeyCode::Left => field.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') => field.cycle_choice(true),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('u') if ctrl => field.buffer.clear(),
        KeyCode::Left if ctrl => {
            field.buffer.move_word_left();
        }
        KeyCode::Right if ctrl => {
            field.buffer.move_word_right();
        }
        KeyCode::Char(ch) if !ctrl && field.accepts(ch) => field.buffer.insert_char(ch),
        KeyCode::Backspace => {
            field.buffer.backspace();
        }
        KeyCode::Delete => {
            field.buffer.delete_char();
        }
        KeyCode::Left => {
            field.buffer.move_left();
        }
        KeyCode::Right => {
            field.buffer.move_right();
        }
        KeyCode::Home => field.buffer.move_to_start(),
        KeyCode::End => field.buffer.move_to_end(),
        _ => {}
    }
}

fn or_untitled(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}
