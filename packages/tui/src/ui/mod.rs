pub mod icons;
pub mod panes;
pub mod widgets;

use crate::state::{Notifications, UiState, VaultState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use widgets::{ConfirmationDialogWidget, EditorWidget, NotificationsWidget, StatusBarWidget};

/// Main UI rendering function
pub fn render(frame: &mut Frame, vault: &VaultState, ui: &UiState, notifications: &Notifications) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[0]);

    panes::render_workspaces(frame, left[0], vault, ui);
    panes::render_sections(frame, left[1], vault, ui);
    panes::render_commands(frame, columns[1], vault, ui);

    frame.render_widget(StatusBarWidget::new(vault, ui), status_area);

    if let Some(editor) = &ui.editor {
        EditorWidget::new(editor).render(frame, main_area);
    }

    // Dialog sits above the editor and the panes
    if let Some(pending) = &ui.confirmation {
        frame.render_widget(ConfirmationDialogWidget::new(&pending.dialog), frame.area());
    }

    if !notifications.is_empty() {
        frame.render_widget(NotificationsWidget::new(notifications), main_area);
    }
}
