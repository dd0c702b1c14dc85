pub mod components;
pub mod screens;
pub mod style;
pub mod widgets;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use crate::app::App;
use crate::ui::screens::workspace::render_workspace;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_workspace(self, area, buf);
    }
}
