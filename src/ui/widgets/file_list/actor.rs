use std::sync::Arc;

use crate::error::ClientError;
use crate::util::io::backend::DocumentBackend;
use crate::util::io::event::{emit, AppEvent, AppEventSender};
use crate::log_error;

/// Issues the delete-all request. The parent decides what happens to its
/// list once `AppEvent::FilesCleared` comes back.
pub struct FileListActor {
    backend: Arc<dyn DocumentBackend>,
    sender: AppEventSender,
}

impl FileListActor {
    pub fn new(backend: Arc<dyn DocumentBackend>, sender: AppEventSender) -> Self {
        Self { backend, sender }
    }

    pub fn clear_all(&self) {
        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = backend.clear_documents().await;
            if let Err(err) = &result {
                log_clear_failure(err);
            }
            emit(&sender, AppEvent::FilesCleared(result));
        });
    }
}

fn log_clear_failure(err: &ClientError) {
    match err {
        ClientError::Backend { .. } => log_error!("Failed to delete documents: {}", err),
        _ => log_error!("Error clearing documents: {}", err),
    }
}
