use ratatui::{
    layout::Alignment,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::UiComponent;
use crate::ui::style::dim_unless_focused;

impl UiComponent {
    /// Placeholder for a panel with nothing to show, one blank row down from
    /// the top. Follows the panel's focus dimming.
    pub fn empty_message(text: &str, is_focused: bool) -> Paragraph<'_> {
        let style = dim_unless_focused(is_focused, Style::default().fg(Color::Gray).italic());
        Paragraph::new(vec![Line::default(), Line::from(text)])
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }
}
