use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::state::{NotificationKind, Notifications};

const TOAST_WIDTH: u16 = 44;
/// Toasts shown at once, newest at the bottom
const MAX_VISIBLE: usize = 4;

/// Stack of transient notifications in the bottom-right corner
pub struct NotificationsWidget<'a> {
    notifications: &'a Notifications,
}

impl<'a> NotificationsWidget<'a> {
    pub fn new(notifications: &'a Notifications) -> Self {
        Self { notifications }
    }
}

impl<'a> Widget for NotificationsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.notifications.items();
        let visible = &items[items.len().saturating_sub(MAX_VISIBLE)..];
        let width = TOAST_WIDTH.min(area.width);
        let text_width = width.saturating_sub(4).max(1) as usize;

        let mut bottom = area.y + area.height;
        for notification in visible.iter().rev() {
            let rows = notification.message.chars().count().div_ceil(text_width).max(1) as u16;
            let height = rows + 2;
            if bottom < area.y + height {
                break;
            }
            let toast = Rect {
                x: area.x + area.width - width,
                y: bottom - height,
                width,
                height,
            };

            let (color, symbol) = match notification.kind {
                NotificationKind::Success => (Color::Green, "✓"),
                NotificationKind::Error => (Color::Red, "✗"),
            };

            Clear.render(toast, buf);
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", symbol), Style::default().fg(color)),
                Span::raw(notification.message.as_str()),
            ]))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(toast, buf);

            bottom -= height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_latest_messages() {
        let mut notifications = Notifications::new();
        notifications.success("Workspace created");
        notifications.error("Command failed: command: Required");

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        NotificationsWidget::new(&notifications).render(area, &mut buf);

        let screen: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("Workspace created"));
        assert!(screen.contains("Command failed"));
    }

    #[test]
    fn test_empty_renders_nothing() {
        let notifications = Notifications::new();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);

        NotificationsWidget::new(&notifications).render(area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }
}
