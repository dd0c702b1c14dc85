use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

use super::state::{Toast, ToastKind, ToastState};

const TOAST_WIDTH: u16 = 44;

/// Stack toasts in the top-right corner of `area`, newest on top.
pub fn render_toasts(state: &ToastState, throbber: &ThrobberState, area: Rect, buf: &mut Buffer) {
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y + 1;

    for toast in state.visible() {
        let height = toast_height(toast, width);
        if y + height > area.y + area.height {
            break;
        }

        let rect = Rect::new(area.x + area.width - width, y, width, height);
        render_toast(toast, throbber, rect, buf);
        y += height;
    }
}

fn toast_height(toast: &Toast, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let description_rows = toast
        .description
        .as_ref()
        .map(|d| d.chars().count().max(1).div_ceil(inner) as u16)
        .unwrap_or(0);
    1 + description_rows + 2
}

fn render_toast(toast: &Toast, throbber: &ThrobberState, area: Rect, buf: &mut Buffer) {
    let (color, icon) = match toast.kind {
        ToastKind::Loading => (Color::Yellow, ""),
        ToastKind::Success => (Color::Green, "✔ "),
        ToastKind::Error => (Color::Red, "✖ "),
        ToastKind::Info => (Color::Blue, "ℹ "),
    };

    let title = if toast.kind == ToastKind::Loading {
        Throbber::default()
            .label(toast.title.clone())
            .style(Style::default().fg(color).bold())
            .throbber_set(BRAILLE_SIX)
            .to_line(throbber)
    } else {
        Line::from(vec![
            Span::styled(icon, Style::default().fg(color)),
            Span::styled(toast.title.clone(), Style::default().fg(color).bold()),
        ])
    };

    let mut lines = vec![title];
    if let Some(description) = &toast.description {
        lines.push(Line::from(description.clone()).style(Style::default().fg(Color::Gray)));
    }

    Clear.render(area, buf);
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
