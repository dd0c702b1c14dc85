pub mod config;
pub mod io;
pub mod log;
pub mod mime;
pub mod service;
pub mod string;
