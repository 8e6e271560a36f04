use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::rows::{Row, RowKind};

pub struct UiContext<'a> {
    pub title: Option<&'a str>,
    pub rows: &'a [Row],
    pub cursor: usize,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], ctx.title);
    render_rows(frame, chunks[1], ctx.rows, ctx.cursor);
    render_footer(frame, chunks[2], &ctx);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, title: Option<&str>) {
    let text = title.unwrap_or("Collection");
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title("Editor").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, rows: &[Row], cursor: usize) {
    if rows.is_empty() {
        let placeholder = Paragraph::new("No items yet. Press Ctrl+N to add one.")
            .block(Block::default().title("Items").borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem<'static>> = rows.iter().map(|row| build_row_item(row, width)).collect();

    let mut list_state = ListState::default();
    list_state.select(Some(cursor.min(rows.len() - 1)));

    let list = List::new(items)
        .block(Block::default().title("Items").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let mut status = ctx.status_message.to_string();
    if ctx.dirty {
        status.push_str(" • unsaved changes");
    }
    if let Some(focused) = ctx.rows.get(ctx.cursor) {
        status.push_str(" • focus: ");
        status.push_str(&focused.label);
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let status_widget = Paragraph::new(status)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_widget, chunks[0]);

    let help_text = ctx.help.unwrap_or(" ");
    let help_widget = Paragraph::new(help_text.to_string())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    frame.render_widget(help_widget, chunks[1]);
}

fn build_row_item(row: &Row, width: usize) -> ListItem<'static> {
    let indent = "  ".repeat(row.depth);

    let label_style = match row.kind {
        RowKind::ItemHeader => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RowKind::ListHeader | RowKind::EntryHeader => Style::default().fg(Color::Cyan),
        RowKind::Append => Style::default().fg(Color::Green),
        RowKind::Static => Style::default().fg(Color::DarkGray),
        RowKind::Input(_) => Style::default().fg(Color::Cyan),
    };

    let mut first_line = vec![Span::raw(indent.clone()), Span::styled(row.label.clone(), label_style)];
    if row.is_editable() || matches!(row.kind, RowKind::ListHeader | RowKind::Static) {
        first_line.push(Span::raw(": "));
        if row.text.is_empty() {
            if let Some(placeholder) = &row.placeholder {
                first_line.push(Span::styled(
                    placeholder.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
        } else if row.multiline {
            // handled below, keep the label line bare
        } else {
            first_line.push(Span::styled(
                truncate(&row.text, width.saturating_sub(row.label.width() + row.depth * 2 + 4)),
                Style::default().fg(Color::White),
            ));
        }
    }

    let mut lines = vec![Line::from(first_line)];
    if row.multiline && !row.text.is_empty() {
        let wrap_width = width.saturating_sub(row.depth * 2 + 2).max(8);
        for wrapped in textwrap::wrap(&row.text, wrap_width) {
            lines.push(Line::from(vec![
                Span::raw(format!("{indent}  ")),
                Span::styled(wrapped.into_owned(), Style::default().fg(Color::White)),
            ]));
        }
    }

    ListItem::new(lines)
}

fn truncate(text: &str, max_width: usize) -> String {
    if max_width == 0 || text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}
