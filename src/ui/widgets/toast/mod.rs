pub mod state;
pub mod widget;

pub use state::{Toast, ToastIntent, ToastKind, ToastState, ToastStateMachine, MAX_VISIBLE_TOASTS};
pub use widget::render_toasts;
