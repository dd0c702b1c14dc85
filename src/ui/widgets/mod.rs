pub mod chat;
pub mod file_list;
pub mod toast;
pub mod uploader;
