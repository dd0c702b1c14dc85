mod empty_message;
mod help;
mod status;

/// Small stock paragraphs shared by the panels.
pub struct UiComponent;
