// src/util/io/backend/mod.rs
//! Client side of the document QA backend contract

pub mod http;
pub mod models;

pub use http::HttpBackend;
pub use models::{
    ErrorBody, HealthStatus, QueryRequest, QueryResponse, SourceDetail, UploadResponse, UploadedFile,
};

use futures::future::BoxFuture;
use crate::error::Result;

/// The four endpoints the client talks to. Object safe so panels can share
/// one `Arc<dyn DocumentBackend>`.
pub trait DocumentBackend: Send + Sync {
    /// `POST /upload`, multipart field `file`.
    fn upload(&self, filename: String, bytes: Vec<u8>) -> BoxFuture<'_, Result<UploadResponse>>;

    /// `POST /query` with `{ "query": ... }`.
    fn query(&self, query: String) -> BoxFuture<'_, Result<QueryResponse>>;

    /// `DELETE /documents`.
    fn clear_documents(&self) -> BoxFuture<'_, Result<()>>;

    /// `GET /health`.
    fn health(&self) -> BoxFuture<'_, Result<HealthStatus>>;
}
