// src/ui/widgets/uploader/state.rs
use std::path::PathBuf;

use crate::error::ClientError;
use crate::util::io::backend::UploadedFile;
use crate::util::mime;
use crate::util::string::StringUtils;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderState {
    /// Path typed into the picker line.
    pub path_input: String,
    /// While set, the picker and drops are disabled.
    pub is_uploading: bool,
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what user wants to do
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub enum UploaderIntent {
    Input(char),
    Backspace,
    ClearInput,
    /// Upload the path in the picker line.
    Submit,
    /// A file dropped onto the terminal, as pasted text.
    Drop(String),
    /// Sent back by the actor when the request settles.
    Finished(Result<UploadedFile, ClientError>),
}

// ----------------------------------------------------------------------------
// EVENTS - Things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub enum UploaderEvent {
    Rejected(ClientError),
    UploadStarted(PathBuf),
    Uploaded(UploadedFile),
    UploadFailed(ClientError),
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct UploaderStateMachine;

impl UploaderStateMachine {
    pub fn transition(
        state: UploaderState,
        intent: UploaderIntent,
    ) -> (UploaderState, Vec<UploaderEvent>) {
        use UploaderIntent::*;

        match intent {
            Input(ch) => Self::handle_input(state, ch),
            Backspace => Self::handle_backspace(state),
            ClearInput => Self::handle_clear_input(state),
            Submit => Self::handle_submit(state),
            Drop(pasted) => Self::handle_drop(state, pasted),
            Finished(result) => Self::handle_finished(state, result),
        }
    }

    fn handle_input(mut state: UploaderState, ch: char) -> (UploaderState, Vec<UploaderEvent>) {
        if !state.is_uploading && ch != '\n' {
            state.path_input.push(ch);
        }
        (state, vec![])
    }

    fn handle_backspace(mut state: UploaderState) -> (UploaderState, Vec<UploaderEvent>) {
        if !state.is_uploading {
            state.path_input.pop();
        }
        (state, vec![])
    }

    fn handle_clear_input(mut state: UploaderState) -> (UploaderState, Vec<UploaderEvent>) {
        if !state.is_uploading {
            state.path_input.clear();
        }
        (state, vec![])
    }

    fn handle_submit(mut state: UploaderState) -> (UploaderState, Vec<UploaderEvent>) {
        if state.is_uploading {
            return (state, vec![]);
        }

        // Typed paths keep their spaces; quoted or file:// input is unwrapped.
        let typed = state.path_input.trim();
        let path = if typed.starts_with(['\'', '"']) || typed.starts_with("file://") {
            StringUtils::parse_dropped_path(typed)
        } else if typed.is_empty() {
            None
        } else {
            Some(PathBuf::from(typed))
        };

        match path {
            Some(path) => {
                state.path_input.clear();
                Self::begin_upload(state, path)
            }
            None => (state, vec![]),
        }
    }

    fn handle_drop(state: UploaderState, pasted: String) -> (UploaderState, Vec<UploaderEvent>) {
        if state.is_uploading {
            return (state, vec![]);
        }

        match StringUtils::parse_dropped_path(&pasted) {
            Some(path) => Self::begin_upload(state, path),
            None => (state, vec![]),
        }
    }

    /// Validation happens here, before anything touches the network.
    fn begin_upload(mut state: UploaderState, path: PathBuf) -> (UploaderState, Vec<UploaderEvent>) {
        if !mime::is_pdf(&path) {
            return (state, vec![UploaderEvent::Rejected(ClientError::invalid_file_type())]);
        }

        state.is_uploading = true;
        (state, vec![UploaderEvent::UploadStarted(path)])
    }

    fn handle_finished(
        mut state: UploaderState,
        result: Result<UploadedFile, ClientError>,
    ) -> (UploaderState, Vec<UploaderEvent>) {
        state.is_uploading = false;

        match result {
            Ok(file) => (state, vec![UploaderEvent::Uploaded(file)]),
            Err(err) => (state, vec![UploaderEvent::UploadFailed(err)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(path: &str) -> UploaderState {
        UploaderState { path_input: path.to_string(), is_uploading: false }
    }

    #[test]
    fn test_non_pdf_is_rejected_without_upload() {
        for name in ["notes.txt", "scan.png", "slides.docx", "README"] {
            let (state, events) = UploaderStateMachine::transition(typed(name), UploaderIntent::Submit);

            assert!(!state.is_uploading);
            assert_eq!(events.len(), 1);
            match &events[0] {
                UploaderEvent::Rejected(err) => assert!(err.is_validation()),
                other => panic!("expected rejection, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_pdf_submit_starts_upload() {
        let (state, events) = UploaderStateMachine::transition(typed("/docs/q3.pdf"), UploaderIntent::Submit);

        assert!(state.is_uploading);
        assert!(state.path_input.is_empty());
        assert!(matches!(&events[..], [UploaderEvent::UploadStarted(p)] if p == &PathBuf::from("/docs/q3.pdf")));
    }

    #[test]
    fn test_typed_path_keeps_spaces() {
        let (_, events) = UploaderStateMachine::transition(typed(" /docs/Annual Report.PDF "), UploaderIntent::Submit);
        assert!(matches!(&events[..], [UploaderEvent::UploadStarted(p)] if p == &PathBuf::from("/docs/Annual Report.PDF")));
    }

    #[test]
    fn test_empty_submit_is_a_no_op() {
        let (state, events) = UploaderStateMachine::transition(typed("   "), UploaderIntent::Submit);
        assert!(!state.is_uploading);
        assert!(events.is_empty());
    }

    #[test]
    fn test_drop_uses_first_pasted_path() {
        let (state, events) = UploaderStateMachine::transition(
            UploaderState::default(),
            UploaderIntent::Drop("'/home/me/My Report.pdf' /home/me/other.pdf".into()),
        );

        assert!(state.is_uploading);
        assert!(matches!(&events[..], [UploaderEvent::UploadStarted(p)] if p == &PathBuf::from("/home/me/My Report.pdf")));
    }

    #[test]
    fn test_uploading_gates_new_submissions() {
        let busy = UploaderState { path_input: String::new(), is_uploading: true };

        let (state, events) = UploaderStateMachine::transition(busy.clone(), UploaderIntent::Drop("/a.pdf".into()));
        assert!(events.is_empty());
        assert_eq!(state, busy);

        let (state, events) = UploaderStateMachine::transition(busy.clone(), UploaderIntent::Input('x'));
        assert!(events.is_empty());
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn test_finished_success_reports_file() {
        let busy = UploaderState { path_input: String::new(), is_uploading: true };
        let file = UploadedFile { filename: "q3.pdf".into(), chunks: 42 };

        let (state, events) = UploaderStateMachine::transition(busy, UploaderIntent::Finished(Ok(file.clone())));

        assert!(!state.is_uploading);
        assert!(matches!(&events[..], [UploaderEvent::Uploaded(f)] if f == &file));
    }

    #[test]
    fn test_finished_failure_clears_uploading() {
        let busy = UploaderState { path_input: String::new(), is_uploading: true };
        let err = ClientError::Backend { status: 400, detail: Some("Only PDF files are allowed.".into()) };

        let (state, events) = UploaderStateMachine::transition(busy, UploaderIntent::Finished(Err(err)));

        assert!(!state.is_uploading);
        assert!(matches!(&events[..], [UploaderEvent::UploadFailed(_)]));
    }

    #[test]
    fn test_typing_edits_path() {
        let mut state = UploaderState::default();
        for ch in "a.pdff".chars() {
            state = UploaderStateMachine::transition(state, UploaderIntent::Input(ch)).0;
        }
        state = UploaderStateMachine::transition(state, UploaderIntent::Backspace).0;
        assert_eq!(state.path_input, "a.pdf");

        state = UploaderStateMachine::transition(state, UploaderIntent::ClearInput).0;
        assert!(state.path_input.is_empty());
    }
}
