pub mod app;
pub mod error;
pub mod ui;
pub mod util;

pub use app::{App, Focus};
pub use error::ClientError;
