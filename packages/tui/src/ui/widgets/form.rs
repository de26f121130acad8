use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::editor::{EditorField, EditorForm, FieldKind};

/// Most content lines a multiline field grows to before scrolling
const MAX_MULTILINE_ROWS: u16 = 8;

/// Renders an open editor form as a centered modal
pub struct EditorWidget<'a> {
    form: &'a EditorForm,
}

impl<'a> EditorWidget<'a> {
    pub fn new(form: &'a EditorForm) -> Self {
        Self { form }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let field_heights: Vec<u16> = self.form.fields.iter().map(field_height).collect();
        let wanted = field_heights.iter().sum::<u16>() + 3;

        let width = (area.width * 2 / 3).max(60).min(area.width.saturating_sub(2));
        let height = wanted.min(area.height.saturating_sub(2));
        let modal = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(format!(" {} ", self.form.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        // Keep the focused field visible: drop leading fields until it fits
        let mut start = 0;
        while start < self.form.focused
            && field_heights[start..=self.form.focused].iter().sum::<u16>() > chunks[0].height
        {
            start += 1;
        }

        let mut y = chunks[0].y;
        let bottom = chunks[0].y + chunks[0].height;
        for (index, field) in self.form.fields.iter().enumerate().skip(start) {
            let height = field_heights[index];
            if y + height > bottom {
                break;
            }
            let field_area = Rect {
                x: chunks[0].x,
                y,
                width: chunks[0].width,
                height,
            };
            render_field(frame, field_area, field, index == self.form.focused);
            y += height;
        }

        let help = if matches!(
            self.form.focused_field().map(|f| &f.kind),
            Some(FieldKind::Multiline)
        ) {
            "Tab/↓: Next • Shift+Tab/↑: Previous • Enter: New line • Ctrl+S: Save • Esc: Cancel"
        } else {
            "Tab/↓: Next • Shift+Tab/↑: Previous • ←/→: Choose • Enter/Ctrl+S: Save • Esc: Cancel"
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
}

fn content_rows(field: &EditorField) -> u16 {
    match field.kind {
        FieldKind::Multiline => {
            let lines = field.buffer.content().split('\n').count() as u16;
            lines.clamp(1, MAX_MULTILINE_ROWS)
        }
        _ => 1,
    }
}

/// Label row plus a bordered input
fn field_height(field: &EditorField) -> u16 {
    1 + content_rows(field) + 2
}

fn render_field(frame: &mut Frame, area: Rect, field: &EditorField, is_current: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let label_style = if is_current {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut label = vec![Span::styled(format!("{}:", field.label), label_style)];
    if let Some(max) = field.max_chars {
        let count = field.buffer.char_count();
        let counter_style = if count > max {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        label.push(Span::styled(format!(" {}/{}", count, max), counter_style));
    }
    frame.render_widget(Paragraph::new(Line::from(label)), chunks[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_current {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        });
    let input_area = chunks[1];
    let inner = input_block.inner(input_area);
    frame.render_widget(input_block, input_area);

    match &field.kind {
        FieldKind::Choice(_) => {
            let value = field.choice_label().unwrap_or_default();
            let line = Line::from(vec![
                Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    value.to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(line), inner);
        }
        _ => {
            let (before, _, _) = field.buffer.split_at_cursor();
            let cursor_row = before.matches('\n').count() as u16;
            let cursor_col = before
                .rsplit('\n')
                .next()
                .map(UnicodeWidthStr::width)
                .unwrap_or(0) as u16;

            let scroll_y = cursor_row.saturating_sub(inner.height.saturating_sub(1));
            let scroll_x = cursor_col.saturating_sub(inner.width.saturating_sub(1));

            let text_style = if is_current {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            let lines: Vec<Line> = field
                .buffer
                .content()
                .split('\n')
                .map(|line| Line::raw(line.to_string()))
                .collect();
            frame.render_widget(
                Paragraph::new(lines)
                    .style(text_style)
                    .scroll((scroll_y, scroll_x)),
                inner,
            );

            if is_current {
                frame.set_cursor_position((
                    inner.x + cursor_col - scroll_x,
                    inner.y + cursor_row - scroll_y,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputBuffer;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(form: &EditorForm) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| EditorWidget::new(form).render(frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_multiline_height_grows_with_content() {
        let mut form = EditorForm::new_command();
        let before = field_height(&form.fields[4]);
        form.fields[4].buffer = InputBuffer::with_content("a\nb\nc");

        assert_eq!(field_height(&form.fields[4]), before + 2);
    }

    #[test]
    fn test_renders_fields_and_choice() {
        let form = EditorForm::new_command();
        let screen = render_to_string(&form);

        assert!(screen.contains("New command"));
        assert!(screen.contains("Title:"));
        assert!(screen.contains("Language:"));
        assert!(screen.contains("Bash"));
        assert!(screen.contains("0/8000"));
    }
}
