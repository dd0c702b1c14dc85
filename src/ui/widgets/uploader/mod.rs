pub mod actor;
pub mod state;
pub mod widget;

pub use actor::UploaderActor;
pub use state::{UploaderEvent, UploaderIntent, UploaderState, UploaderStateMachine};
pub use widget::render_uploader;
