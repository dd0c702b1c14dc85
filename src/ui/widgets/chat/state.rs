// src/ui/widgets/chat/state.rs
use crate::error::ClientError;
use crate::util::io::backend::{QueryResponse, SourceDetail};

pub const GREETING: &str =
    "Hello! I can answer questions about your uploaded documents. What would you like to know?";

pub const FAILURE_REPLY: &str =
    "Sorry, I encountered an error answering your question. Please ensure the backend is running and files are uploaded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript turn. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub sources: Vec<SourceDetail>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), sources: Vec::new() }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<SourceDetail>) -> Self {
        Self { role: Role::Assistant, content: content.into(), sources }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    AwaitingResponse,
}

/// A citation picked out of the transcript: (message index, source index).
pub type SourceRef = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    pub transcript: Vec<Message>,
    pub input: String,
    pub phase: ChatPhase,
    /// Lines scrolled up from the newest line; 0 follows the conversation.
    pub scroll_offset: usize,
    pub selected_source: Option<SourceRef>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            transcript: vec![Message::assistant(GREETING, Vec::new())],
            input: String::new(),
            phase: ChatPhase::Idle,
            scroll_offset: 0,
            selected_source: None,
        }
    }
}

impl ChatState {
    pub fn is_awaiting(&self) -> bool {
        self.phase == ChatPhase::AwaitingResponse
    }

    pub fn can_submit(&self) -> bool {
        !self.is_awaiting() && !self.input.trim().is_empty()
    }

    /// Every citation in transcript order.
    pub fn source_refs(&self) -> Vec<SourceRef> {
        self.transcript
            .iter()
            .enumerate()
            .flat_map(|(m, msg)| (0..msg.sources.len()).map(move |s| (m, s)))
            .collect()
    }

    pub fn selected_source_detail(&self) -> Option<&SourceDetail> {
        let (m, s) = self.selected_source?;
        self.transcript.get(m)?.sources.get(s)
    }
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what user wants to do
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub enum ChatIntent {
    Input(char),
    Paste(String),
    Newline,
    Backspace,
    Submit,
    Answered(QueryResponse),
    Failed(ClientError),
    ScrollUp,
    ScrollDown,
    NextSource,
    PrevSource,
    ClearSourceSelection,
}

// ----------------------------------------------------------------------------
// EVENTS - Things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub enum ChatEvent {
    QuerySubmitted(String),
    TranscriptChanged { len: usize },
    QueryFailed(ClientError),
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct ChatStateMachine;

impl ChatStateMachine {
    pub fn transition(state: ChatState, intent: ChatIntent) -> (ChatState, Vec<ChatEvent>) {
        use ChatIntent::*;

        match intent {
            Input(ch) => Self::handle_edit(state, |input| input.push(ch)),
            Paste(text) => Self::handle_edit(state, |input| input.push_str(&text.replace('\r', ""))),
            Newline => Self::handle_edit(state, |input| input.push('\n')),
            Backspace => Self::handle_edit(state, |input| {
                input.pop();
            }),
            Submit => Self::handle_submit(state),
            Answered(response) => Self::handle_answered(state, response),
            Failed(err) => Self::handle_failed(state, err),
            ScrollUp => Self::handle_scroll_up(state),
            ScrollDown => Self::handle_scroll_down(state),
            NextSource => Self::handle_cycle_source(state, 1),
            PrevSource => Self::handle_cycle_source(state, -1),
            ClearSourceSelection => Self::handle_clear_selection(state),
        }
    }

    /// The input is disabled while a response is pending.
    fn handle_edit(mut state: ChatState, edit: impl FnOnce(&mut String)) -> (ChatState, Vec<ChatEvent>) {
        if !state.is_awaiting() {
            edit(&mut state.input);
        }
        (state, vec![])
    }

    fn handle_submit(mut state: ChatState) -> (ChatState, Vec<ChatEvent>) {
        if !state.can_submit() {
            return (state, vec![]);
        }

        let query = state.input.trim().to_string();
        state.input.clear();
        state.transcript.push(Message::user(query.clone()));
        state.phase = ChatPhase::AwaitingResponse;
        state.scroll_offset = 0;

        let len = state.transcript.len();
        (state, vec![
            ChatEvent::QuerySubmitted(query),
            ChatEvent::TranscriptChanged { len },
        ])
    }

    fn handle_answered(mut state: ChatState, response: QueryResponse) -> (ChatState, Vec<ChatEvent>) {
        if !state.is_awaiting() {
            return (state, vec![]);
        }

        let sources = response.sources.unwrap_or_default();
        state.transcript.push(Message::assistant(response.answer, sources));
        state.phase = ChatPhase::Idle;
        state.scroll_offset = 0;

        let len = state.transcript.len();
        (state, vec![ChatEvent::TranscriptChanged { len }])
    }

    fn handle_failed(mut state: ChatState, err: ClientError) -> (ChatState, Vec<ChatEvent>) {
        if !state.is_awaiting() {
            return (state, vec![]);
        }

        state.transcript.push(Message::assistant(FAILURE_REPLY, Vec::new()));
        state.phase = ChatPhase::Idle;
        state.scroll_offset = 0;

        let len = state.transcript.len();
        (state, vec![
            ChatEvent::QueryFailed(err),
            ChatEvent::TranscriptChanged { len },
        ])
    }

    fn handle_scroll_up(mut state: ChatState) -> (ChatState, Vec<ChatEvent>) {
        // Clamped against the rendered height by the widget.
        state.scroll_offset += 1;
        (state, vec![])
    }

    fn handle_scroll_down(mut state: ChatState) -> (ChatState, Vec<ChatEvent>) {
        state.scroll_offset = state.scroll_offset.saturating_sub(1);
        (state, vec![])
    }

    fn handle_cycle_source(mut state: ChatState, direction: i32) -> (ChatState, Vec<ChatEvent>) {
        let refs = state.source_refs();
        if refs.is_empty() {
            return (state, vec![]);
        }

        let len = refs.len() as i32;
        let current = state
            .selected_source
            .and_then(|selected| refs.iter().position(|r| *r == selected));

        let next = match current {
            // Start from the newest citation going back, the oldest going forward.
            None if direction < 0 => len - 1,
            None => 0,
            Some(index) => (index as i32 + direction + len) % len,
        };

        state.selected_source = Some(refs[next as usize]);
        (state, vec![])
    }

    fn handle_clear_selection(mut state: ChatState) -> (ChatState, Vec<ChatEvent>) {
        state.selected_source = None;
        (state, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_input(input: &str) -> ChatState {
        ChatState { input: input.to_string(), ..ChatState::default() }
    }

    fn doc_answer() -> QueryResponse {
        QueryResponse {
            answer: "X is Y.".into(),
            sources: Some(vec![SourceDetail {
                file: "doc.pdf".into(),
                page: Some(2),
                chunk_content: "...".into(),
            }]),
            source_count: Some(1),
        }
    }

    #[test]
    fn test_starts_idle_with_greeting() {
        let state = ChatState::default();
        assert_eq!(state.phase, ChatPhase::Idle);
        assert_eq!(state.transcript, vec![Message::assistant(GREETING, vec![])]);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        for input in ["", "   ", "\n\t "] {
            let (state, events) = ChatStateMachine::transition(with_input(input), ChatIntent::Submit);
            assert!(events.is_empty());
            assert_eq!(state.transcript.len(), 1);
            assert_eq!(state.phase, ChatPhase::Idle);
        }
    }

    #[test]
    fn test_submit_appends_trimmed_user_message() {
        let (state, events) = ChatStateMachine::transition(with_input("  What is X?\n"), ChatIntent::Submit);

        assert_eq!(state.phase, ChatPhase::AwaitingResponse);
        assert!(state.input.is_empty());
        assert_eq!(state.transcript.last(), Some(&Message::user("What is X?")));
        assert!(matches!(&events[0], ChatEvent::QuerySubmitted(q) if q == "What is X?"));
    }

    #[test]
    fn test_round_trip_adds_exactly_two_entries() {
        let before = ChatState::default().transcript.len();

        let (state, _) = ChatStateMachine::transition(with_input("What is X?"), ChatIntent::Submit);
        let (state, events) = ChatStateMachine::transition(state, ChatIntent::Answered(doc_answer()));

        assert_eq!(state.transcript.len(), before + 2);
        assert_eq!(state.transcript[before].role, Role::User);
        let reply = &state.transcript[before + 1];
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "X is Y.");
        assert_eq!(reply.sources[0].label(), "doc.pdf (p. 2)");
        assert_eq!(state.phase, ChatPhase::Idle);
        assert!(matches!(&events[..], [ChatEvent::TranscriptChanged { len }] if *len == before + 2));
    }

    #[test]
    fn test_failure_appends_apology_without_sources() {
        let (state, _) = ChatStateMachine::transition(with_input("What is X?"), ChatIntent::Submit);
        let err = ClientError::Backend { status: 500, detail: None };
        let (state, events) = ChatStateMachine::transition(state, ChatIntent::Failed(err));

        let reply = state.transcript.last().unwrap();
        assert_eq!(reply.content, FAILURE_REPLY);
        assert!(reply.sources.is_empty());
        assert_eq!(state.phase, ChatPhase::Idle);
        assert!(matches!(&events[0], ChatEvent::QueryFailed(_)));
    }

    #[test]
    fn test_second_submit_while_awaiting_has_no_effect() {
        let (state, _) = ChatStateMachine::transition(with_input("first"), ChatIntent::Submit);
        let len_after_one = state.transcript.len();

        // Rapid second Enter with something already typed.
        let state = ChatState { input: "second".into(), ..state };
        let (state, events) = ChatStateMachine::transition(state, ChatIntent::Submit);

        assert!(events.is_empty());
        assert_eq!(state.transcript.len(), len_after_one);
        assert_eq!(state.input, "second");
    }

    #[test]
    fn test_input_disabled_while_awaiting() {
        let (state, _) = ChatStateMachine::transition(with_input("q"), ChatIntent::Submit);
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::Input('x'));
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::Paste("pasted".into()));
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_newline_is_kept_in_input() {
        let mut state = with_input("line one");
        state = ChatStateMachine::transition(state, ChatIntent::Newline).0;
        state = ChatStateMachine::transition(state, ChatIntent::Input('2')).0;
        assert_eq!(state.input, "line one\n2");
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_late_response_without_pending_query_is_dropped() {
        let (state, events) = ChatStateMachine::transition(ChatState::default(), ChatIntent::Answered(doc_answer()));
        assert!(events.is_empty());
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_mutation_scrolls_to_newest() {
        let mut state = with_input("q");
        state.scroll_offset = 7;
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::Submit);
        assert_eq!(state.scroll_offset, 0);

        let state = ChatState { scroll_offset: 3, ..state };
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::Answered(doc_answer()));
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_down_stops_at_bottom() {
        let (state, _) = ChatStateMachine::transition(ChatState::default(), ChatIntent::ScrollUp);
        assert_eq!(state.scroll_offset, 1);
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::ScrollDown);
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::ScrollDown);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_cycling_sources() {
        let mut state = ChatState::default();
        state.transcript.push(Message::user("q1"));
        state.transcript.push(Message::assistant("a1", vec![
            SourceDetail { file: "a.pdf".into(), page: Some(1), chunk_content: "alpha".into() },
            SourceDetail { file: "b.pdf".into(), page: None, chunk_content: "beta".into() },
        ]));

        let (state, _) = ChatStateMachine::transition(state, ChatIntent::NextSource);
        assert_eq!(state.selected_source, Some((2, 0)));
        assert_eq!(state.selected_source_detail().unwrap().chunk_content, "alpha");

        let (state, _) = ChatStateMachine::transition(state, ChatIntent::NextSource);
        let (state, _) = ChatStateMachine::transition(state, ChatIntent::NextSource);
        assert_eq!(state.selected_source, Some((2, 0)));

        let (state, _) = ChatStateMachine::transition(state, ChatIntent::PrevSource);
        assert_eq!(state.selected_source, Some((2, 1)));

        let (state, _) = ChatStateMachine::transition(state, ChatIntent::ClearSourceSelection);
        assert_eq!(state.selected_source, None);
    }

    #[test]
    fn test_cycling_without_sources_is_a_no_op() {
        let (state, _) = ChatStateMachine::transition(ChatState::default(), ChatIntent::NextSource);
        assert_eq!(state.selected_source, None);
    }
}
