use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::UiComponent;
use crate::util::service::health::BackendStatus;

impl UiComponent {
    pub fn status(backend_url: &str, status: BackendStatus) -> Paragraph<'static> {
        let color = match status {
            BackendStatus::Unknown => Color::Gray,
            BackendStatus::Online => Color::Green,
            BackendStatus::Offline => Color::Red,
        };

        let line = Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(format!("backend: {}", status.label()), Style::default().fg(color)),
            Span::styled(format!("  {}", backend_url), Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line)
            .block(
                Block::bordered()
                    .title(" Backend ")
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
            )
            .alignment(Alignment::Center)
    }
}
