use std::time::{Duration, Instant};

use cmdvault_core::{CommandEntry, Section, Workspace};

use crate::editor::EditorForm;
use crate::ui::widgets::ConfirmationDialog;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Cached server data plus the current selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultState {
    pub workspaces: Vec<Workspace>,
    pub sections: Vec<Section>,
    pub commands: Vec<CommandEntry>,
    pub selected_workspace_id: Option<String>,
    pub selected_section_id: Option<String>,
}

impl VaultState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_workspace(&self) -> Option<&Workspace> {
        let id = self.selected_workspace_id.as_deref()?;
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn active_section(&self) -> Option<&Section> {
        let id = self.selected_section_id.as_deref()?;
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn workspace_index(&self) -> Option<usize> {
        let id = self.selected_workspace_id.as_deref()?;
        self.workspaces.iter().position(|w| w.id == id)
    }

    pub fn section_index(&self) -> Option<usize> {
        let id = self.selected_section_id.as_deref()?;
        self.sections.iter().position(|s| s.id == id)
    }

    /// Replace the workspace list. Selects the first workspace when nothing
    /// is selected or the selection no longer exists.
    pub fn set_workspaces(&mut self, workspaces: Vec<Workspace>) {
        self.workspaces = workspaces;

        let selection_valid = self
            .selected_workspace_id
            .as_deref()
            .map(|id| self.workspaces.iter().any(|w| w.id == id))
            .unwrap_or(false);

        if !selection_valid {
            self.selected_workspace_id = self.workspaces.first().map(|w| w.id.clone());
        }
    }

    /// Replace the section list. Selects the first section when nothing is
    /// selected; a selection missing from the new list falls back to the first
    /// section, or none.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;

        let selection_valid = self
            .selected_section_id
            .as_deref()
            .map(|id| self.sections.iter().any(|s| s.id == id))
            .unwrap_or(false);

        if !selection_valid {
            self.selected_section_id = self.sections.first().map(|s| s.id.clone());
        }
    }

    pub fn set_commands(&mut self, commands: Vec<CommandEntry>) {
        self.commands = commands;
    }

    pub fn select_workspace(&mut self, workspace_id: &str) -> bool {
        if self.selected_workspace_id.as_deref() == Some(workspace_id) {
            return false;
        }
        self.selected_workspace_id = Some(workspace_id.to_string());
        true
    }

    pub fn select_section(&mut self, section_id: &str) -> bool {
        if self.selected_section_id.as_deref() == Some(section_id) {
            return false;
        }
        self.selected_section_id = Some(section_id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_workspace_id = None;
        self.selected_section_id = None;
    }

    pub fn clear_section_selection(&mut self) {
        self.selected_section_id = None;
    }

    /// ID of the workspace `offset` rows away from the selected one, clamped to the list
    pub fn neighbor_workspace_id(&self, offset: isize) -> Option<String> {
        let index = neighbor_index(self.workspace_index(), self.workspaces.len(), offset)?;
        self.workspaces.get(index).map(|w| w.id.clone())
    }

    /// ID of the section `offset` rows away from the selected one, clamped to the list
    pub fn neighbor_section_id(&self, offset: isize) -> Option<String> {
        let index = neighbor_index(self.section_index(), self.sections.len(), offset)?;
        self.sections.get(index).map(|s| s.id.clone())
    }
}

fn neighbor_index(current: Option<usize>, len: usize, offset: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as isize;
    let target = (current + offset).clamp(0, len as isize - 1);
    Some(target as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

/// Transient success/failure messages shown over the UI
#[derive(Debug)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message.into())
    }

    fn push(&mut self, kind: NotificationKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            message,
            created_at: Instant::now(),
        });
        id
    }

    /// Drop every notification older than the display time
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    /// Dismiss the most recent notification early
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Which list has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Workspaces,
    Sections,
    Commands,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Workspaces => Pane::Sections,
            Pane::Sections => Pane::Commands,
            Pane::Commands => Pane::Workspaces,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Pane::Workspaces => Pane::Commands,
            Pane::Sections => Pane::Workspaces,
            Pane::Commands => Pane::Sections,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pane::Workspaces => "Workspaces",
            Pane::Sections => "Sections",
            Pane::Commands => "Commands",
        }
    }
}

/// Record a delete is waiting on confirmation for
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Workspace(String),
    Section(String),
    Command(String),
}

#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    pub dialog: ConfirmationDialog,
}

/// Terminal-only state: focus, command cursor, open editor or dialog
#[derive(Debug, Default)]
pub struct UiState {
    pub focus: Pane,
    pub command_cursor: usize,
    pub editor: Option<EditorForm>,
    pub confirmation: Option<PendingDelete>,
    pub server_url: String,
}

impl UiState {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn is_showing_confirmation_dialog(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn move_command_cursor(&mut self, offset: isize, command_count: usize) {
        self.command_cursor = neighbor_index(Some(self.command_cursor), command_count, offset)
            .unwrap_or(0);
    }

    /// Keep the cursor inside the list after a refetch
    pub fn clamp_command_cursor(&mut self, command_count: usize) {
        if command_count == 0 {
            self.command_cursor = 0;
        } else if self.command_cursor >= command_count {
            self.command_cursor = command_count - 1;
        }
    }
}
