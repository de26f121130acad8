use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use cmdvault_core::{language_label, CommandEntry};

use crate::highlight::highlight;
use crate::state::{Pane, UiState, VaultState};
use crate::ui::icons;

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block<'static>, hint: &str) {
    let text = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(text, area);
}

pub fn render_workspaces(frame: &mut Frame, area: Rect, vault: &VaultState, ui: &UiState) {
    let focused = ui.focus == Pane::Workspaces;
    let block = pane_block(format!(" Workspaces ({}) ", vault.workspaces.len()), focused);

    if vault.workspaces.is_empty() {
        render_empty(frame, area, block, "No workspaces. Press n to create one.");
        return;
    }

    let items: Vec<ListItem> = vault
        .workspaces
        .iter()
        .map(|workspace| ListItem::new(format!(" ▣ {}", workspace.name)))
        .collect();

    let mut list_state = ListState::default().with_selected(vault.workspace_index());
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_sections(frame: &mut Frame, area: Rect, vault: &VaultState, ui: &UiState) {
    let focused = ui.focus == Pane::Sections;
    let block = pane_block(format!(" Sections ({}) ", vault.sections.len()), focused);

    if vault.active_workspace().is_none() {
        render_empty(frame, area, block, "Select a workspace.");
        return;
    }
    if vault.sections.is_empty() {
        render_empty(frame, area, block, "No sections yet. Press n to add one.");
        return;
    }

    let items: Vec<ListItem> = vault
        .sections
        .iter()
        .map(|section| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", icons::glyph(&section.icon)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(section.title.clone()),
            ]))
        })
        .collect();

    let mut list_state = ListState::default().with_selected(vault.section_index());
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_commands(frame: &mut Frame, area: Rect, vault: &VaultState, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let focused = ui.focus == Pane::Commands;
    let title = match vault.active_section() {
        Some(section) => format!(
            " {} {} ({}) ",
            icons::glyph(&section.icon),
            section.title,
            vault.commands.len()
        ),
        None => " Commands ".to_string(),
    };
    let block = pane_block(title, focused);

    if vault.active_section().is_none() {
        render_empty(frame, area, block, "Select or create a section to see its commands.");
        return;
    }
    if vault.commands.is_empty() {
        render_empty(frame, area, block, "No commands in this section. Press n to add one.");
        return;
    }

    let items: Vec<ListItem> = vault
        .commands
        .iter()
        .map(|command| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}", command.title)),
                Span::styled(
                    format!("  [{}]", display_language(&command.language)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let cursor = ui.command_cursor.min(vault.commands.len() - 1);
    let mut list_state = ListState::default().with_selected(Some(cursor));
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused))
        .highlight_symbol("›");
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(command) = vault.commands.get(cursor) {
        render_command_detail(frame, chunks[1], command);
    }
}

fn display_language(tag: &str) -> &str {
    language_label(tag).unwrap_or(tag)
}

fn render_command_detail(frame: &mut Frame, area: Rect, command: &CommandEntry) {
    let block = pane_block(format!(" {} ", command.title), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_rows = if command.description.is_empty() {
        0
    } else {
        (command.description.lines().count() as u16).min(inner.height / 3) + 1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(description_rows),
            Constraint::Min(1),
        ])
        .split(inner);

    let meta = Line::from(vec![
        Span::styled(
            display_language(&command.language).to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  • position {}", command.position),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "  • updated {}",
                command.updated_at.format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(meta), chunks[0]);

    if description_rows > 0 {
        frame.render_widget(
            Paragraph::new(command.description.as_str())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }

    let snippet = Paragraph::new(highlight(&command.command, &command.language)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(snippet, chunks[2]);
}
