pub mod backend;
pub mod event;
pub mod terminal;
