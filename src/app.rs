use std::sync::Arc;
use std::time::Instant;

use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use throbber_widgets_tui::ThrobberState;
use uuid::Uuid;

use crate::error::ClientError;
use crate::ui::widgets::chat::{ChatActor, ChatIntent, ChatState, ChatStateMachine};
use crate::ui::widgets::file_list::FileListActor;
use crate::ui::widgets::toast::{Toast, ToastIntent, ToastKind, ToastState, ToastStateMachine};
use crate::ui::widgets::uploader::{
    UploaderActor, UploaderEvent, UploaderIntent, UploaderState, UploaderStateMachine,
};
use crate::util::config::AppConfig;
use crate::util::io::backend::{DocumentBackend, UploadedFile};
use crate::util::io::event::{AppEvent, Event, EventHandler};
use crate::util::service::health::BackendStatus;
use crate::log_info;

pub const UPLOADING_MESSAGE: &str = "Uploading file...";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";
pub const CLEARED_MESSAGE: &str = "All documents cleared";
pub const CLEAR_FAILED_MESSAGE: &str = "Failed to clear documents";

/// Which panel receives keys and pastes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Uploader,
    Files,
    Chat,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Uploader => Focus::Files,
            Focus::Files => Focus::Chat,
            Focus::Chat => Focus::Uploader,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Uploader => Focus::Chat,
            Focus::Files => Focus::Uploader,
            Focus::Chat => Focus::Files,
        }
    }
}

struct Actors {
    uploader: UploaderActor,
    chat: ChatActor,
    file_list: FileListActor,
}

/// Application.
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub focus: Focus,

    /// Uploaded files, in upload order. Only `on_upload_success` and
    /// `on_clear_files` change it.
    pub files: Vec<UploadedFile>,
    pub selected_file: usize,
    /// A delete-all request is in flight.
    pub clearing: bool,

    pub uploader: UploaderState,
    pub chat: ChatState,
    pub toasts: ToastState,
    pub backend_status: BackendStatus,
    pub throbber: ThrobberState,

    /// Event handler.
    pub events: EventHandler,
    pub config: AppConfig,

    upload_toast: Option<Uuid>,
    needs_redraw: bool,
    actors: Actors,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: AppConfig, backend: Arc<dyn DocumentBackend>, events: EventHandler) -> Self {
        let sender = events.sender();
        let actors = Actors {
            uploader: UploaderActor::new(Arc::clone(&backend), sender.clone()),
            chat: ChatActor::new(Arc::clone(&backend), sender.clone()),
            file_list: FileListActor::new(backend, sender),
        };

        Self {
            running: true,
            focus: Focus::default(),
            files: Vec::new(),
            selected_file: 0,
            clearing: false,
            uploader: UploaderState::default(),
            chat: ChatState::default(),
            toasts: ToastState::default(),
            backend_status: BackendStatus::default(),
            throbber: ThrobberState::default(),
            events,
            config,
            upload_toast: None,
            needs_redraw: true,
            actors,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while self.running {
            if self.needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                // save power
                self.needs_redraw = false;
            }

            self.handle_next_event().await?;
        }
        Ok(())
    }

    /// Wait for one event and apply it.
    pub async fn handle_next_event(&mut self) -> Result<()> {
        let event = self.events.next().await?;
        self.handle_event(event);
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.tick(),
            Event::Crossterm(event) => match event {
                CrosstermEvent::Key(key_event) => self.handle_key_event(key_event),
                CrosstermEvent::Paste(text) => self.handle_paste(text),
                CrosstermEvent::Resize(_, _) => self.needs_redraw = true,
                _ => {}
            },
            Event::App(app_event) => {
                self.handle_app_event(app_event);
                self.needs_redraw = true;
            }
        }
    }

    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::FocusNext => self.focus = self.focus.next(),
            AppEvent::FocusPrev => self.focus = self.focus.prev(),
            AppEvent::Quit => self.quit(),
            AppEvent::HealthChecked(status) => self.backend_status = status,
            AppEvent::Uploader(intent) => self.apply_uploader(intent),
            AppEvent::Chat(intent) => self.apply_chat(intent),
            AppEvent::SelectNextFile => {
                if self.selected_file + 1 < self.files.len() {
                    self.selected_file += 1;
                }
            }
            AppEvent::SelectPrevFile => self.selected_file = self.selected_file.saturating_sub(1),
            AppEvent::ClearFiles => self.request_clear_all(),
            AppEvent::FilesCleared(result) => self.on_clear_result(result),
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Char('c' | 'C') if ctrl => return self.events.send(AppEvent::Quit),
            KeyCode::Tab => return self.events.send(AppEvent::FocusNext),
            KeyCode::BackTab => return self.events.send(AppEvent::FocusPrev),
            _ => {}
        }

        match self.focus {
            Focus::Uploader => self.handle_uploader_key(key_event),
            Focus::Files => self.handle_files_key(key_event),
            Focus::Chat => self.handle_chat_key(key_event),
        }
    }

    fn handle_uploader_key(&self, key_event: KeyEvent) {
        let intent = match key_event.code {
            KeyCode::Enter => UploaderIntent::Submit,
            KeyCode::Backspace => UploaderIntent::Backspace,
            KeyCode::Esc => UploaderIntent::ClearInput,
            KeyCode::Char(ch) if !has_command_modifier(&key_event) => UploaderIntent::Input(ch),
            _ => return,
        };
        self.events.send(AppEvent::Uploader(intent));
    }

    fn handle_files_key(&self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::SelectPrevFile),
            KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::SelectNextFile),
            KeyCode::Char('d') | KeyCode::Delete => self.events.send(AppEvent::ClearFiles),
            _ => {}
        }
    }

    fn handle_chat_key(&self, key_event: KeyEvent) {
        let modifiers = key_event.modifiers;
        let intent = match key_event.code {
            KeyCode::Enter if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                ChatIntent::Newline
            }
            KeyCode::Enter => ChatIntent::Submit,
            KeyCode::Backspace => ChatIntent::Backspace,
            KeyCode::Up | KeyCode::PageUp => ChatIntent::ScrollUp,
            KeyCode::Down | KeyCode::PageDown => ChatIntent::ScrollDown,
            KeyCode::Esc => ChatIntent::ClearSourceSelection,
            KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => ChatIntent::NextSource,
            KeyCode::Char('p') if modifiers.contains(KeyModifiers::CONTROL) => ChatIntent::PrevSource,
            KeyCode::Char(ch) if !has_command_modifier(&key_event) => ChatIntent::Input(ch),
            _ => return,
        };
        self.events.send(AppEvent::Chat(intent));
    }

    /// Bracketed paste. Over the uploader a paste is a file drop.
    pub fn handle_paste(&mut self, text: String) {
        match self.focus {
            Focus::Uploader => self.events.send(AppEvent::Uploader(UploaderIntent::Drop(text))),
            Focus::Chat => self.events.send(AppEvent::Chat(ChatIntent::Paste(text))),
            Focus::Files => {}
        }
    }

    fn apply_uploader(&mut self, intent: UploaderIntent) {
        let state = std::mem::take(&mut self.uploader);
        let (state, events) = UploaderStateMachine::transition(state, intent);
        self.uploader = state;

        for event in &events {
            match event {
                UploaderEvent::Rejected(err) => self.push_error_toast(err),
                UploaderEvent::UploadStarted(_) => {
                    let toast = Toast::loading(UPLOADING_MESSAGE);
                    self.upload_toast = Some(toast.id);
                    self.apply_toast(ToastIntent::Push(toast));
                }
                UploaderEvent::Uploaded(file) => {
                    let message = format!(
                        "File \"{}\" uploaded successfully ({} chunks).",
                        file.filename, file.chunks
                    );
                    self.resolve_upload_toast(ToastKind::Success, message);
                    self.on_upload_success(file.filename.clone(), file.chunks);
                }
                UploaderEvent::UploadFailed(err) => {
                    self.resolve_upload_toast(ToastKind::Error, err.user_message(UPLOAD_FAILED_MESSAGE));
                }
            }
        }

        self.actors.uploader.handle_side_effects(&events);
    }

    fn apply_chat(&mut self, intent: ChatIntent) {
        let state = std::mem::take(&mut self.chat);
        let (state, events) = ChatStateMachine::transition(state, intent);
        self.chat = state;
        self.actors.chat.handle_side_effects(&events);
    }

    fn apply_toast(&mut self, intent: ToastIntent) {
        let state = std::mem::take(&mut self.toasts);
        self.toasts = ToastStateMachine::transition(state, intent);
    }

    fn resolve_upload_toast(&mut self, kind: ToastKind, title: String) {
        let id = self.upload_toast.take().unwrap_or_else(Uuid::new_v4);
        self.apply_toast(ToastIntent::Resolve {
            id,
            kind,
            title,
            description: None,
            ttl: self.config.toast_duration(),
        });
    }

    fn push_toast(&mut self, kind: ToastKind, title: impl Into<String>, description: Option<String>) {
        let toast = Toast::new(kind, title, description, self.config.toast_duration());
        self.apply_toast(ToastIntent::Push(toast));
    }

    fn push_error_toast(&mut self, err: &ClientError) {
        match err {
            ClientError::Validation { title, description } => {
                self.push_toast(ToastKind::Error, title.clone(), Some(description.clone()))
            }
            other => self.push_toast(ToastKind::Error, other.to_string(), None),
        }
    }

    /// Append a confirmed upload to the file list.
    pub fn on_upload_success(&mut self, filename: String, chunks: u64) {
        log_info!("Uploaded {} ({} chunks)", filename, chunks);
        self.files.push(UploadedFile { filename, chunks });
    }

    /// Empty the file list after the backend confirmed deletion.
    pub fn on_clear_files(&mut self) {
        self.files.clear();
        self.selected_file = 0;
    }

    /// Ask the backend to delete every document. Does nothing when there is
    /// nothing to clear or a request is already out.
    pub fn request_clear_all(&mut self) {
        if self.files.is_empty() || self.clearing {
            return;
        }
        self.clearing = true;
        self.actors.file_list.clear_all();
    }

    fn on_clear_result(&mut self, result: Result<(), ClientError>) {
        self.clearing = false;
        match result {
            Ok(()) => {
                self.on_clear_files();
                self.push_toast(ToastKind::Success, CLEARED_MESSAGE, None);
            }
            // Already logged by the actor; the list stays as it was.
            Err(err) => {
                let detail = err.user_message(&err.to_string());
                self.push_toast(ToastKind::Error, CLEAR_FAILED_MESSAGE, Some(detail));
            }
        }
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&mut self) {
        let before = self.toasts.toasts.len();
        self.apply_toast(ToastIntent::Expire(Instant::now()));

        let animating = self.uploader.is_uploading || self.chat.is_awaiting() || self.toasts.has_loading();
        if animating {
            self.throbber.calc_next();
        }
        if animating || before != self.toasts.toasts.len() {
            self.needs_redraw = true;
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Ctrl/Alt combinations are commands, never text.
fn has_command_modifier(key_event: &KeyEvent) -> bool {
    key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
