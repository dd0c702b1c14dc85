use std::sync::Arc;

use super::state::{ChatEvent, ChatIntent};
use crate::util::io::backend::DocumentBackend;
use crate::util::io::event::{emit, AppEvent, AppEventSender};
use crate::log_warn;

/// Sends each submitted question to the backend and feeds the answer, or
/// the failure, back into the chat state machine.
pub struct ChatActor {
    backend: Arc<dyn DocumentBackend>,
    sender: AppEventSender,
}

impl ChatActor {
    pub fn new(backend: Arc<dyn DocumentBackend>, sender: AppEventSender) -> Self {
        Self { backend, sender }
    }

    pub fn handle_side_effects(&self, events: &[ChatEvent]) {
        for event in events {
            match event {
                ChatEvent::QuerySubmitted(query) => self.spawn_query(query.clone()),
                ChatEvent::QueryFailed(err) => log_warn!("Query failed: {}", err),
                ChatEvent::TranscriptChanged { .. } => {}
            }
        }
    }

    fn spawn_query(&self, query: String) {
        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let intent = match backend.query(query).await {
                Ok(response) => ChatIntent::Answered(response),
                Err(err) => ChatIntent::Failed(err),
            };
            emit(&sender, AppEvent::Chat(intent));
        });
    }
}
