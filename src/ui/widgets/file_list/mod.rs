// src/ui/widgets/file_list/mod.rs
pub mod actor;
pub mod widget;

// No state machine here: the file collection belongs to the App and is only
// changed through its upload and clear callbacks.
pub use actor::FileListActor;
pub use widget::{render_file_list, FileListView, EMPTY_MESSAGE};
