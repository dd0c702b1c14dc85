// src/util/io/backend/models.rs
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub chunks_count: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// A citation attached to an answer. Produced entirely by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDetail {
    pub file: String,
    #[serde(default)]
    pub page: Option<u32>,
    pub chunk_content: String,
}

impl SourceDetail {
    /// `doc.pdf (p. 2)`, or just the file name when there is no page. Pages
    /// are 1-based, so `0` counts as missing.
    pub fn label(&self) -> String {
        match self.page {
            Some(page) if page > 0 => format!("{} (p. {})", self.file, page),
            _ => self.file.clone(),
        }
    }
}

/// Body of a successful `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceDetail>>,
    #[serde(default)]
    pub source_count: Option<u64>,
}

/// Optional body of a failed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// An entry in the uploaded-files list; only ever built from a confirmed
/// upload response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub chunks: u64,
}

impl From<UploadResponse> for UploadedFile {
    fn from(response: UploadResponse) -> Self {
        Self {
            filename: response.filename,
            chunks: response.chunks_count,
        }
    }
}
