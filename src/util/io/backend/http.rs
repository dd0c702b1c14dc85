// src/util/io/backend/http.rs

use std::time::Duration;
use futures::future::{BoxFuture, FutureExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ErrorBody, HealthStatus, QueryRequest, QueryResponse, UploadResponse};
use super::DocumentBackend;
use crate::error::{ClientError, Result};
use crate::util::mime::PDF_MIME;

/// `DocumentBackend` over HTTP with a single shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("docqa-tui/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-OK response into `ClientError::Backend`, keeping the
    /// `detail` field when the body carries one.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);

        warn!(status = status.as_u16(), ?detail, "backend request failed");
        Err(ClientError::Backend { status: status.as_u16(), detail })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn do_upload(&self, filename: String, bytes: Vec<u8>) -> Result<UploadResponse> {
        debug!(%filename, size = bytes.len(), "uploading document");

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);

        let response = self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn do_query(&self, query: String) -> Result<QueryResponse> {
        debug!(len = query.len(), "sending query");

        let response = self.client
            .post(self.url("/query"))
            .json(&QueryRequest { query })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn do_clear_documents(&self) -> Result<()> {
        debug!("clearing all documents");

        let response = self.client
            .delete(self.url("/documents"))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn do_health(&self) -> Result<HealthStatus> {
        let response = self.client
            .get(self.url("/health"))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }
}

impl DocumentBackend for HttpBackend {
    fn upload(&self, filename: String, bytes: Vec<u8>) -> BoxFuture<'_, Result<UploadResponse>> {
        self.do_upload(filename, bytes).boxed()
    }

    fn query(&self, query: String) -> BoxFuture<'_, Result<QueryResponse>> {
        self.do_query(query).boxed()
    }

    fn clear_documents(&self) -> BoxFuture<'_, Result<()>> {
        self.do_clear_documents().boxed()
    }

    fn health(&self) -> BoxFuture<'_, Result<HealthStatus>> {
        self.do_health().boxed()
    }
}
