// src/ui/widgets/file_list/widget.rs
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;
use crate::util::io::backend::UploadedFile;
use crate::util::string::StringUtils;

pub const EMPTY_MESSAGE: &str = "No files uploaded yet.";

/// Columns a row spends on everything but the name: highlight symbol, icon,
/// and the chunk count.
const ROW_CHROME: usize = 18;

/// What the parent hands the list on every frame; the list keeps nothing.
pub struct FileListView<'a> {
    pub files: &'a [UploadedFile],
    pub selected: usize,
    pub clearing: bool,
    pub is_focused: bool,
}

pub fn render_file_list(view: FileListView, area: Rect, buf: &mut Buffer) {
    let border_style = dim_unless_focused(view.is_focused, Style::default().fg(Color::Yellow));
    let title = format!(" Uploaded Files ({}) ", view.files.len());
    let container = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = container.inner(area);
    container.render(area, buf);

    if view.files.is_empty() {
        UiComponent::empty_message(EMPTY_MESSAGE, view.is_focused).render(inner, buf);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // files
            Constraint::Length(1), // full name of the selection
            Constraint::Length(1), // clear action
        ])
        .split(inner);

    let name_width = (inner.width as usize).saturating_sub(ROW_CHROME).max(4);
    let items: Vec<ListItem> = view
        .files
        .iter()
        .map(|file| file_row(file, name_width))
        .collect();

    let highlight = if view.is_focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .highlight_style(highlight)
        .highlight_symbol("▶ ");

    let selected = view.selected.min(view.files.len() - 1);
    let mut list_state = ListState::default().with_selected(Some(selected));
    StatefulWidget::render(list, rows[0], buf, &mut list_state);

    if let Some(file) = view.files.get(selected) {
        Paragraph::new(file.filename.clone())
            .style(Style::default().fg(Color::Gray).italic())
            .render(rows[1], buf);
    }

    let action = if view.clearing {
        Line::from(Span::styled("Clearing documents...", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled("[d] ", Style::default().fg(Color::Red).bold()),
            Span::styled("Clear All", dim_unless_focused(view.is_focused, Style::default().fg(Color::Red))),
        ])
    };
    Paragraph::new(action).render(rows[2], buf);
}

fn file_row(file: &UploadedFile, name_width: usize) -> ListItem<'static> {
    let name = StringUtils::truncate_with_ellipsis(&file.filename, name_width);
    let chunks = StringUtils::maybe_pluralize_count(file.chunks as usize, ("chunk", "chunks"));
    let padding = name_width.saturating_sub(name.chars().count()) + 1;

    ListItem::new(Line::from(vec![
        Span::styled(format!("📄 {}", name), Style::default().fg(Color::White)),
        Span::raw(" ".repeat(padding)),
        Span::styled(chunks, Style::default().fg(Color::DarkGray)),
    ]))
}
