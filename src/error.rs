use thiserror::Error;

/// Failures a client operation can end in. Every variant is handled by the
/// panel that issued the request; nothing bubbles to a global handler.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected before any request was made (wrong file type).
    #[error("{title}: {description}")]
    Validation { title: String, description: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-OK status. `detail` carries the backend's own message when the
    /// body had one.
    #[error("Backend returned {status}{}", detail_suffix(.detail))]
    Backend { status: u16, detail: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn invalid_file_type() -> Self {
        ClientError::Validation {
            title: "Invalid file type".to_string(),
            description: "Please upload a PDF file.".to_string(),
        }
    }

    /// Text shown to the user. A backend detail is passed through verbatim,
    /// anything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation { description, .. } => description.clone(),
            ClientError::Backend { detail: Some(detail), .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detail_is_surfaced_verbatim() {
        let err = ClientError::Backend { status: 400, detail: Some("Only PDF files are allowed.".into()) };
        assert_eq!(err.user_message("Upload failed"), "Only PDF files are allowed.");
    }

    #[test]
    fn test_missing_detail_falls_back() {
        let err = ClientError::Backend { status: 500, detail: None };
        assert_eq!(err.user_message("Upload failed"), "Upload failed");

        let err = ClientError::Backend { status: 500, detail: Some(String::new()) };
        assert_eq!(err.user_message("Upload failed"), "Upload failed");
    }

    #[test]
    fn test_display_includes_status() {
        let err = ClientError::Backend { status: 503, detail: None };
        assert_eq!(err.to_string(), "Backend returned 503");

        let err = ClientError::Backend { status: 422, detail: Some("bad".into()) };
        assert_eq!(err.to_string(), "Backend returned 422: bad");
    }
}
