pub mod actor;
pub mod state;
pub mod widget;

pub use actor::ChatActor;
pub use state::{
    ChatEvent, ChatIntent, ChatPhase, ChatState, ChatStateMachine, Message, Role, FAILURE_REPLY, GREETING,
};
pub use widget::render_chat;
