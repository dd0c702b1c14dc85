use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::state::{UploaderEvent, UploaderIntent};
use crate::error::Result;
use crate::util::io::backend::{DocumentBackend, UploadedFile};
use crate::util::io::event::{emit, AppEvent, AppEventSender};
use crate::log_info;

/// Runs the upload request for an accepted file and reports the outcome back
/// as `UploaderIntent::Finished`. One request per accepted file, no retries.
pub struct UploaderActor {
    backend: Arc<dyn DocumentBackend>,
    sender: AppEventSender,
}

impl UploaderActor {
    pub fn new(backend: Arc<dyn DocumentBackend>, sender: AppEventSender) -> Self {
        Self { backend, sender }
    }

    pub fn handle_side_effects(&self, events: &[UploaderEvent]) {
        for event in events {
            if let UploaderEvent::UploadStarted(path) = event {
                self.spawn_upload(path.clone());
            }
        }
    }

    fn spawn_upload(&self, path: PathBuf) {
        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = upload_file(backend.as_ref(), &path).await;
            emit(&sender, AppEvent::Uploader(UploaderIntent::Finished(result)));
        });
    }
}

async fn upload_file(backend: &dyn DocumentBackend, path: &Path) -> Result<UploadedFile> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    log_info!("Uploading {} ({} bytes)", path.display(), bytes.len());
    let response = backend.upload(filename, bytes).await?;
    Ok(UploadedFile::from(response))
}
