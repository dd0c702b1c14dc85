use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::ui::components::UiComponent;
use crate::ui::widgets::chat::render_chat;
use crate::ui::widgets::file_list::{render_file_list, FileListView};
use crate::ui::widgets::toast::render_toasts;
use crate::ui::widgets::uploader::render_uploader;

pub fn render_workspace(app: &App, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Panels
            Constraint::Length(3), // Status/Help
        ])
        .split(area);

    let title = Paragraph::new("Document Q&A")
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
        )
        .fg(Color::Cyan)
        .bold()
        .alignment(Alignment::Center);
    title.render(main_layout[0], buf);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Uploader + files
            Constraint::Percentage(65), // Chat
        ])
        .split(main_layout[1]);

    let left_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(5),
        ])
        .split(content_layout[0]);

    render_uploader(
        &app.uploader,
        &app.throbber,
        left_layout[0],
        buf,
        app.focus == Focus::Uploader,
    );

    render_file_list(
        FileListView {
            files: &app.files,
            selected: app.selected_file,
            clearing: app.clearing,
            is_focused: app.focus == Focus::Files,
        },
        left_layout[1],
        buf,
    );

    render_chat(
        &app.chat,
        &app.throbber,
        content_layout[1],
        buf,
        app.focus == Focus::Chat,
    );

    let footer_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(65),
        ])
        .split(main_layout[2]);

    UiComponent::status(&app.config.backend_url, app.backend_status).render(footer_layout[0], buf);
    UiComponent::help(help_text(app)).render(footer_layout[1], buf);

    // Toasts float over everything else.
    render_toasts(&app.toasts, &app.throbber, area, buf);
}

fn help_text(app: &App) -> &'static str {
    match app.focus {
        Focus::Uploader if app.uploader.is_uploading => "Tab: next panel • Ctrl+C: quit",
        Focus::Uploader => "Type a path + Enter or drop a PDF • Esc: clear • Tab: next panel • Ctrl+C: quit",
        Focus::Files if app.files.is_empty() => "Tab: next panel • Ctrl+C: quit",
        Focus::Files => "↑/↓: select • d: clear all • Tab: next panel • Ctrl+C: quit",
        Focus::Chat => "Enter: send • Tab: next panel • Ctrl+C: quit",
    }
}
