use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::api::VaultApi;
use crate::controller::VaultController;
use crate::editor::{EditorForm, EditorOutcome, EditorSubmission};
use crate::events::{AppEvent, EventHandler};
use crate::state::{DeleteTarget, Pane, PendingDelete, UiState};
use crate::ui;
use crate::ui::widgets::{ConfirmationDialog, DialogResult};

/// Tick interval driving notification expiry
const TICK_RATE_MS: u64 = 250;

/// Main TUI application struct
pub struct App<A> {
    pub controller: VaultController<A>,
    pub ui: UiState,
    pub should_quit: bool,
}

impl<A: VaultApi> App<A> {
    pub fn new(api: A, server_url: impl Into<String>) -> Self {
        Self {
            controller: VaultController::new(api),
            ui: UiState::new(server_url),
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut event_handler = EventHandler::new(TICK_RATE_MS);

        self.controller.load().await;
        self.sync_cursor();

        while !self.should_quit {
            terminal.draw(|frame| {
                ui::render(
                    frame,
                    &self.controller.state,
                    &self.ui,
                    &self.controller.notifications,
                );
            })?;

            match event_handler.next().await {
                Some(AppEvent::Key(key)) => self.handle_key(key).await,
                Some(AppEvent::Tick) => self.on_tick(),
                None => self.quit(),
            }
        }

        Ok(())
    }

    pub fn on_tick(&mut self) {
        self.controller.notifications.prune(Instant::now());
        self.sync_cursor();
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if self.ui.is_showing_confirmation_dialog() {
            self.handle_confirmation_key(key.code).await;
        } else if self.ui.is_editing() {
            self.handle_editor_key(key).await;
        } else {
            self.handle_browse_key(key).await;
        }
    }

    async fn handle_confirmation_key(&mut self, code: KeyCode) {
        let result = match self.ui.confirmation.as_mut() {
            Some(pending) => pending.dialog.handle_key(code),
            None => return,
        };

        match result {
            DialogResult::Pending => {}
            DialogResult::Cancelled => self.ui.confirmation = None,
            DialogResult::Confirmed => {
                if let Some(pending) = self.ui.confirmation.take() {
                    self.delete(pending.target).await;
                }
            }
        }
    }

    async fn delete(&mut self, target: DeleteTarget) {
        match target {
            DeleteTarget::Workspace(id) => {
                self.controller.delete_workspace(&id).await;
            }
            DeleteTarget::Section(id) => {
                self.controller.delete_section(&id).await;
            }
            DeleteTarget::Command(id) => {
                self.controller.delete_command(&id).await;
            }
        }
        self.sync_cursor();
    }

    async fn handle_editor_key(&mut self, key: KeyEvent) {
        let outcome = match self.ui.editor.as_mut() {
            Some(editor) => editor.handle_key(key),
            None => return,
        };

        match outcome {
            EditorOutcome::Pending => {}
            EditorOutcome::Cancelled => self.ui.editor = None,
            EditorOutcome::Submitted(submission) => {
                // The form stays open on failure so nothing typed is lost
                if self.submit(submission).await {
                    self.ui.editor = None;
                }
            }
        }
    }

    async fn submit(&mut self, submission: EditorSubmission) -> bool {
        let saved = match submission {
            EditorSubmission::Workspace { id, name } => {
                self.controller.save_workspace(id.as_deref(), name).await
            }
            EditorSubmission::Section { id, draft } => {
                self.controller.save_section(id.as_deref(), draft).await
            }
            EditorSubmission::Command { id, draft } => {
                self.controller.save_command(id.as_deref(), draft).await
            }
        };
        self.sync_cursor();
        saved
    }

    async fn handle_browse_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.quit();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => self.ui.focus = self.ui.focus.next(),
            KeyCode::BackTab => self.ui.focus = self.ui.focus.previous(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1).await,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1).await,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if self.ui.focus != Pane::Commands {
                    self.ui.focus = self.ui.focus.next();
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.ui.focus != Pane::Workspaces {
                    self.ui.focus = self.ui.focus.previous();
                }
            }
            KeyCode::Char('n') => self.open_new_editor(),
            KeyCode::Char('e') => self.open_edit_editor(),
            KeyCode::Char('d') => self.confirm_delete(),
            KeyCode::Char('r') => {
                self.controller.reload().await;
                self.sync_cursor();
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.controller.notifications.dismiss_latest();
            }
            _ => {}
        }
    }

    async fn move_selection(&mut self, offset: isize) {
        match self.ui.focus {
            Pane::Workspaces => {
                if let Some(id) = self.controller.state.neighbor_workspace_id(offset) {
                    self.controller.select_workspace(&id).await;
                    self.ui.command_cursor = 0;
                }
            }
            Pane::Sections => {
                if let Some(id) = self.controller.state.neighbor_section_id(offset) {
                    self.controller.select_section(&id).await;
                    self.ui.command_cursor = 0;
                }
            }
            Pane::Commands => {
                let count = self.controller.state.commands.len();
                self.ui.move_command_cursor(offset, count);
            }
        }
    }

    fn open_new_editor(&mut self) {
        let state = &self.controller.state;
        let form = match self.ui.focus {
            Pane::Workspaces => EditorForm::new_workspace(),
            Pane::Sections if state.active_workspace().is_some() => EditorForm::new_section(),
            Pane::Commands if state.active_section().is_some() => EditorForm::new_command(),
            Pane::Sections => {
                self.controller.notifications.error("Select a workspace first");
                return;
            }
            Pane::Commands => {
                self.controller.notifications.error("Select a section first");
                return;
            }
        };
        self.ui.editor = Some(form);
    }

    fn open_edit_editor(&mut self) {
        let state = &self.controller.state;
        let form = match self.ui.focus {
            Pane::Workspaces => state.active_workspace().map(EditorForm::edit_workspace),
            Pane::Sections => state.active_section().map(EditorForm::edit_section),
            Pane::Commands => self
                .selected_command_id()
                .and_then(|id| state.commands.iter().find(|c| c.id == id))
                .map(EditorForm::edit_command),
        };
        if form.is_some() {
            self.ui.editor = form;
        }
    }

    fn confirm_delete(&mut self) {
        let state = &self.controller.state;
        let pending = match self.ui.focus {
            Pane::Workspaces => state.selected_workspace_id.clone().map(|id| PendingDelete {
                target: DeleteTarget::Workspace(id),
                dialog: ConfirmationDialog::delete(
                    "Delete workspace? This also deletes its sections & commands.",
                ),
            }),
            Pane::Sections => state.selected_section_id.clone().map(|id| PendingDelete {
                target: DeleteTarget::Section(id),
                dialog: ConfirmationDialog::delete("Delete section? This also deletes its commands."),
            }),
            Pane::Commands => self.selected_command_id().map(|id| PendingDelete {
                target: DeleteTarget::Command(id),
                dialog: ConfirmationDialog::delete("Delete command?"),
            }),
        };
        if pending.is_some() {
            self.ui.confirmation = pending;
        }
    }

    fn selected_command_id(&self) -> Option<String> {
        self.controller
            .state
            .commands
            .get(self.ui.command_cursor)
            .map(|c| c.id.clone())
    }

    fn sync_cursor(&mut self) {
        let count = self.controller.state.commands.len();
        self.ui.clamp_command_cursor(count);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
