// src/ui/widgets/chat/widget.rs
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

use super::state::{ChatState, Message, Role};
use crate::ui::style::dim_unless_focused;

const MAX_INPUT_ROWS: u16 = 4;
const SOURCE_DETAIL_ROWS: u16 = 6;

pub fn render_chat(
    state: &ChatState,
    throbber: &ThrobberState,
    area: Rect,
    buf: &mut Buffer,
    is_focused: bool,
) {
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::bordered()
        .title(" Document Assistant ")
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    let input_rows = (state.input.lines().count().max(1) as u16).min(MAX_INPUT_ROWS) + 2;
    let detail_rows = if state.selected_source_detail().is_some() { SOURCE_DETAIL_ROWS } else { 0 };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // description
            Constraint::Min(3),              // transcript
            Constraint::Length(detail_rows), // selected citation
            Constraint::Length(input_rows),  // input
            Constraint::Length(1),           // key hints
        ])
        .split(inner);

    Paragraph::new("Ask questions based on the context of your uploaded documents.")
        .style(dim_unless_focused(is_focused, Style::default().fg(Color::Gray)))
        .render(rows[0], buf);

    render_transcript(state, throbber, rows[1], buf);

    if let Some(source) = state.selected_source_detail() {
        Paragraph::new(source.chunk_content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue))
                    .title(format!(" {} ", source.label())),
            )
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(rows[2], buf);
    }

    render_input(state, rows[3], buf, is_focused);

    let hints = if state.is_awaiting() {
        "Waiting for the answer... • ↑↓: scroll"
    } else {
        "Enter: send • Shift+Enter: newline • ↑↓: scroll • Ctrl+N/P: sources • Esc: hide source"
    };
    Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .render(rows[4], buf);
}

fn render_transcript(state: &ChatState, throbber: &ThrobberState, area: Rect, buf: &mut Buffer) {
    let paragraph = Paragraph::new(Text::from(transcript_lines(state, throbber))).wrap(Wrap { trim: false });

    // Rows after word wrapping, as the paragraph itself will lay them out.
    let total_rows = paragraph.line_count(area.width);
    let max_scroll = total_rows.saturating_sub(area.height as usize);
    let offset = state.scroll_offset.min(max_scroll);
    let top = max_scroll - offset;

    paragraph
        .scroll((top.min(u16::MAX as usize) as u16, 0))
        .render(area, buf);
}

/// The transcript as display lines: each turn, its citation labels, and the
/// thinking indicator while a response is pending.
pub fn transcript_lines(state: &ChatState, throbber: &ThrobberState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, msg) in state.transcript.iter().enumerate() {
        push_message(&mut lines, msg, index, state);
        lines.push(Line::from(""));
    }

    if state.is_awaiting() {
        let thinking = Throbber::default()
            .label("Thinking...")
            .style(Style::default().fg(Color::Gray))
            .throbber_set(BRAILLE_SIX)
            .to_line(throbber);

        let mut spans = vec![Span::styled("Assistant: ", assistant_style().add_modifier(Modifier::BOLD))];
        spans.extend(thinking.spans);
        lines.push(Line::from(spans));
    }

    lines
}

fn push_message(lines: &mut Vec<Line<'static>>, msg: &Message, index: usize, state: &ChatState) {
    let (prefix, style) = match msg.role {
        Role::User => ("You: ", Style::default().fg(Color::Cyan)),
        Role::Assistant => ("Assistant: ", assistant_style()),
    };

    let mut content_lines = msg.content.lines();
    let first_line = content_lines.next().unwrap_or_default().to_string();

    lines.push(Line::from(vec![
        Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
        Span::styled(first_line, Style::default().fg(Color::White)),
    ]));

    for line in content_lines {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(line.to_string(), Style::default().fg(Color::White)),
        ]));
    }

    if msg.sources.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled("    Sources: ", Style::default().fg(Color::Gray).bold())];
    for (source_index, source) in msg.sources.iter().enumerate() {
        let is_selected = state.selected_source == Some((index, source_index));
        let label_style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Blue)
        } else {
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
        };
        if source_index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{}]", source.label()), label_style));
    }
    lines.push(Line::from(spans));
}

fn render_input(state: &ChatState, area: Rect, buf: &mut Buffer, is_focused: bool) {
    let (title, style) = if state.is_awaiting() {
        (" Waiting for response ", Style::default().fg(Color::DarkGray))
    } else {
        (" Type your question ", Style::default().fg(Color::Yellow))
    };
    let border_color = if is_focused && !state.is_awaiting() { Color::Yellow } else { Color::DarkGray };

    let mut text = format!("> {}", state.input);
    if is_focused && !state.is_awaiting() {
        text.push('▏');
    }

    // Keep the end of a long input visible.
    let visible_rows = area.height.saturating_sub(2) as usize;
    let line_count = text.lines().count();
    let skip = line_count.saturating_sub(visible_rows);

    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        )
        .style(style)
        .scroll((skip.min(u16::MAX as usize) as u16, 0))
        .render(area, buf);
}

fn assistant_style() -> Style {
    Style::default().fg(Color::Green)
}
