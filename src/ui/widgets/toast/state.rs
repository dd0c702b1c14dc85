// src/ui/widgets/toast/state.rs
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Stays up until resolved.
    Loading,
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub expires_at: Option<Instant>,
}

impl Toast {
    pub fn loading(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Loading,
            title: title.into(),
            description: None,
            expires_at: None,
        }
    }

    pub fn new(kind: ToastKind, title: impl Into<String>, description: Option<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description,
            expires_at: Some(Instant::now() + ttl),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastState {
    /// Oldest first.
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Newest first, capped for display.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_VISIBLE_TOASTS)
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn has_loading(&self) -> bool {
        self.toasts.iter().any(|t| t.kind == ToastKind::Loading)
    }
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what user wants to do
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ToastIntent {
    Push(Toast),
    /// Turn a loading toast into its final form.
    Resolve {
        id: Uuid,
        kind: ToastKind,
        title: String,
        description: Option<String>,
        ttl: Duration,
    },
    Expire(Instant),
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> State
// ----------------------------------------------------------------------------

pub struct ToastStateMachine;

impl ToastStateMachine {
    pub fn transition(mut state: ToastState, intent: ToastIntent) -> ToastState {
        match intent {
            ToastIntent::Push(toast) => {
                state.toasts.push(toast);
            }
            ToastIntent::Resolve { id, kind, title, description, ttl } => {
                let resolved = Toast {
                    id,
                    kind,
                    title,
                    description,
                    expires_at: Some(Instant::now() + ttl),
                };
                match state.toasts.iter_mut().find(|t| t.id == id) {
                    Some(toast) => *toast = resolved,
                    None => state.toasts.push(resolved),
                }
            }
            ToastIntent::Expire(now) => {
                state.toasts.retain(|t| t.expires_at.map_or(true, |at| at > now));
            }
        }
        state
    }
}
