use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Result of user interaction with the confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
    /// Dialog is still waiting for user input
    Pending,
}

/// Which button currently has focus
#[derive(Debug, Clone, PartialEq)]
pub enum DialogFocus {
    /// Default, so a stray Enter never deletes
    Cancel,
    Confirm,
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Destructive actions render in red
    pub dangerous: bool,
    pub focus: DialogFocus,
}

impl ConfirmationDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            dangerous: false,
            focus: DialogFocus::Cancel,
        }
    }

    /// Dialog asking to confirm a delete
    pub fn delete(message: impl Into<String>) -> Self {
        Self::new(" Confirm delete ", message)
            .dangerous()
            .with_buttons("Delete", "Cancel")
    }

    pub fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }

    pub fn with_buttons(mut self, confirm_text: impl Into<String>, cancel_text: impl Into<String>) -> Self {
        self.confirm_text = confirm_text.into();
        self.cancel_text = cancel_text.into();
        self
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            DialogFocus::Cancel => DialogFocus::Confirm,
            DialogFocus::Confirm => DialogFocus::Cancel,
        };
    }

    /// Handle key input and return the result
    pub fn handle_key(&mut self, key: KeyCode) -> DialogResult {
        match key {
            // Two buttons, so both directions toggle
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.next_focus();
                DialogResult::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                DialogFocus::Cancel => DialogResult::Cancelled,
                DialogFocus::Confirm => DialogResult::Confirmed,
            },
            KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Confirmed,
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => DialogResult::Cancelled,
            _ => DialogResult::Pending,
        }
    }
}

/// Widget for rendering a confirmation dialog
pub struct ConfirmationDialogWidget<'a> {
    dialog: &'a ConfirmationDialog,
}

impl<'a> ConfirmationDialogWidget<'a> {
    pub fn new(dialog: &'a ConfirmationDialog) -> Self {
        Self { dialog }
    }
}

impl<'a> Widget for ConfirmationDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_width = (area.width / 3).max(50).min(area.width.saturating_sub(4));
        let text_width = dialog_width.saturating_sub(4).max(1);

        let content_height = 6 + self.dialog.message.chars().count() as u16 / text_width + 2;
        let dialog_height = content_height.max(9).min(area.height.saturating_sub(2));

        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(dialog_width) / 2,
            y: area.y + area.height.saturating_sub(dialog_height) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        Clear.render(dialog_area, buf);

        let accent = if self.dialog.dangerous {
            Color::Red
        } else {
            Color::Yellow
        };

        let block = Block::default()
            .title(self.dialog.title.clone())
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(3)])
            .split(inner);

        let content_text = vec![
            Line::from(vec![
                Span::styled("⚠  ", Style::default().fg(Color::Yellow)),
                Span::raw(self.dialog.message.as_str()),
            ]),
            Line::raw(""),
        ];

        Paragraph::new(Text::from(content_text))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let button_area = chunks[1];
        let cancel_label = format!("[{}]", self.dialog.cancel_text);
        let confirm_label = format!("[{}]", self.dialog.confirm_text);
        let cancel_width = cancel_label.chars().count() as u16;
        let confirm_width = confirm_label.chars().count() as u16;
        let spacing = 3;
        let start_x = button_area
            .width
            .saturating_sub(cancel_width + confirm_width + spacing)
            / 2;

        let cancel_style = if self.dialog.focus == DialogFocus::Cancel {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let confirm_color = if self.dialog.dangerous {
            Color::Red
        } else {
            Color::Green
        };
        let confirm_style = if self.dialog.focus == DialogFocus::Confirm {
            Style::default()
                .bg(confirm_color)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(confirm_color)
        };

        let buttons_y = button_area.y;
        buf.set_string(button_area.x + start_x, buttons_y, &cancel_label, cancel_style);
        buf.set_string(
            button_area.x + start_x + cancel_width + spacing,
            buttons_y,
            &confirm_label,
            confirm_style,
        );

        if button_area.height > 1 {
            Paragraph::new("Tab: Switch • Enter: Select • y/n • Esc: Cancel")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y: button_area.y + 1,
                        height: 1,
                        ..button_area
                    },
                    buf,
                );
        }
    }
}
