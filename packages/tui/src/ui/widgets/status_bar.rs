use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::state::{Pane, UiState, VaultState};

/// Status bar with a breadcrumb on the left and context shortcuts on the right
pub struct StatusBarWidget<'a> {
    vault: &'a VaultState,
    ui: &'a UiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(vault: &'a VaultState, ui: &'a UiState) -> Self {
        Self { vault, ui }
    }

    fn mode_info(&self) -> (&'static str, Style) {
        if self.ui.is_showing_confirmation_dialog() {
            ("CONFIRM", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        } else if self.ui.is_editing() {
            ("EDIT", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            (self.ui.focus.label(), Style::default().fg(Color::Cyan))
        }
    }

    /// Workspace › Section, or a hint when nothing is selected
    pub fn breadcrumb(&self) -> String {
        match (self.vault.active_workspace(), self.vault.active_section()) {
            (Some(workspace), Some(section)) => {
                format!(" {} › {}", workspace.name, section.title)
            }
            (Some(workspace), None) => format!(" {}", workspace.name),
            (None, _) => " No workspace".to_string(),
        }
    }

    pub fn shortcuts(&self) -> &'static str {
        if self.ui.is_showing_confirmation_dialog() {
            return "Tab: Switch • Enter: Select • y/n";
        }
        if self.ui.is_editing() {
            return "Ctrl+S: Save • Esc: Cancel";
        }
        match self.ui.focus {
            Pane::Workspaces | Pane::Sections => {
                "↑↓: Select • Tab: Pane • n: New • e: Edit • d: Delete • r: Reload • q: Quit"
            }
            Pane::Commands => {
                "↑↓: Move • Tab: Pane • n: New • e: Edit • d: Delete • r: Reload • q: Quit"
            }
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let (mode, mode_style) = self.mode_info();
        let left = Line::from(vec![
            Span::styled(format!(" {} ", mode), mode_style),
            Span::styled("│", Style::default().fg(Color::DarkGray)),
            Span::styled(self.breadcrumb(), Style::default().fg(Color::White)),
        ]);
        Paragraph::new(left)
            .style(Style::default().bg(Color::Black))
            .render(chunks[0], buf);

        Paragraph::new(format!("{} ", self.shortcuts()))
            .style(Style::default().fg(Color::DarkGray).bg(Color::Black))
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}
