// src/ui/widgets/uploader/widget.rs
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

use super::state::UploaderState;
use crate::ui::style::dim_unless_focused;

pub fn render_uploader(
    state: &UploaderState,
    throbber: &ThrobberState,
    area: Rect,
    buf: &mut Buffer,
    is_focused: bool,
) {
    // The focused panel doubles as the drop target highlight.
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::bordered()
        .title(" Upload Document ")
        .border_type(if is_focused { BorderType::Double } else { BorderType::Rounded })
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // description
            Constraint::Min(1),    // drop zone
            Constraint::Length(1), // path input
        ])
        .split(inner);

    Paragraph::new("Upload a PDF to add to the knowledge base.")
        .style(dim_unless_focused(is_focused, Style::default().fg(Color::Gray)))
        .render(rows[0], buf);

    let drop_zone: Line = if state.is_uploading {
        Throbber::default()
            .label("Uploading...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(BRAILLE_SIX)
            .to_line(throbber)
    } else {
        Line::from("Drop a PDF here, or type its path and press Enter")
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
    };

    Paragraph::new(drop_zone)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(vertically_centered(rows[1]), buf);

    let input_style = if state.is_uploading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let cursor = if is_focused && !state.is_uploading { "▏" } else { "" };

    Paragraph::new(Line::from(vec![
        Span::styled("> ", input_style.bold()),
        Span::styled(state.path_input.clone(), input_style),
        Span::raw(cursor),
    ]))
    .render(rows[2], buf);
}

fn vertically_centered(area: Rect) -> Rect {
    if area.height <= 1 {
        return area;
    }
    Rect { y: area.y + area.height / 2, height: 1, ..area }
}
