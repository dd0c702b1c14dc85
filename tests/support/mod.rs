#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

use docqa_tui::app::App;
use docqa_tui::error::{ClientError, Result};
use docqa_tui::util::config::AppConfig;
use docqa_tui::util::io::backend::{DocumentBackend, HealthStatus, QueryResponse, UploadResponse};
use docqa_tui::util::io::event::EventHandler;
use docqa_tui::util::log::set_log_dir;

// ----------------------------------------------------------------------------
// Logging
// ----------------------------------------------------------------------------

static LOG_DIR: OnceLock<TempDir> = OnceLock::new();

/// Point the process-wide logger at a scratch directory. Call before anything
/// can log.
pub fn init_logging() -> &'static Path {
    LOG_DIR
        .get_or_init(|| {
            let dir = TempDir::new().unwrap();
            set_log_dir(dir.path());
            dir
        })
        .path()
}

// ----------------------------------------------------------------------------
// Scripted backend
// ----------------------------------------------------------------------------

/// A canned failure: status code and optional `detail`.
pub type Failure = (u16, Option<String>);

fn settle<T: Clone>(reply: &Mutex<std::result::Result<T, Failure>>) -> Result<T> {
    reply
        .lock()
        .unwrap()
        .clone()
        .map_err(|(status, detail)| ClientError::Backend { status, detail })
}

/// In-memory `DocumentBackend` that records every call and answers from a
/// script. Gates hold a request open until the test releases it.
pub struct FakeBackend {
    pub upload_reply: Mutex<std::result::Result<UploadResponse, Failure>>,
    pub query_reply: Mutex<std::result::Result<QueryResponse, Failure>>,
    pub clear_reply: Mutex<std::result::Result<(), Failure>>,
    pub health_reply: Mutex<std::result::Result<HealthStatus, Failure>>,
    pub calls: Mutex<Vec<String>>,
    pub upload_gate: Mutex<Option<Arc<Notify>>>,
    pub query_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            upload_reply: Mutex::new(Ok(UploadResponse {
                filename: "report.pdf".into(),
                chunks_count: 4,
                status: Some("success".into()),
                message: None,
            })),
            query_reply: Mutex::new(Ok(QueryResponse {
                answer: "42".into(),
                sources: None,
                source_count: None,
            })),
            clear_reply: Mutex::new(Ok(())),
            health_reply: Mutex::new(Ok(HealthStatus { status: "ok".into() })),
            calls: Mutex::new(Vec::new()),
            upload_gate: Mutex::new(None),
            query_gate: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Hold queries until the returned handle is notified.
    pub fn gate_queries(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.query_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Hold uploads until the returned handle is notified.
    pub fn gate_uploads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.upload_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(gate: &Mutex<Option<Arc<Notify>>>) {
        let gate = gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

impl DocumentBackend for FakeBackend {
    fn upload(&self, filename: String, bytes: Vec<u8>) -> BoxFuture<'_, Result<UploadResponse>> {
        async move {
            self.record(format!("upload:{}:{}", filename, bytes.len()));
            Self::wait(&self.upload_gate).await;
            settle(&self.upload_reply)
        }
        .boxed()
    }

    fn query(&self, query: String) -> BoxFuture<'_, Result<QueryResponse>> {
        async move {
            self.record(format!("query:{}", query));
            Self::wait(&self.query_gate).await;
            settle(&self.query_reply)
        }
        .boxed()
    }

    fn clear_documents(&self) -> BoxFuture<'_, Result<()>> {
        async move {
            self.record("clear".to_string());
            settle(&self.clear_reply)
        }
        .boxed()
    }

    fn health(&self) -> BoxFuture<'_, Result<HealthStatus>> {
        async move {
            self.record("health".to_string());
            settle(&self.health_reply)
        }
        .boxed()
    }
}

// ----------------------------------------------------------------------------
// App driving
// ----------------------------------------------------------------------------

pub fn app_with(backend: Arc<FakeBackend>) -> App {
    init_logging();
    App::new(AppConfig::default(), backend, EventHandler::headless())
}

/// Process the next queued event, failing the test if none shows up.
pub async fn pump(app: &mut App) {
    tokio::time::timeout(Duration::from_secs(5), app.handle_next_event())
        .await
        .expect("timed out waiting for an event")
        .expect("event channel closed");
}

// ----------------------------------------------------------------------------
// Canned HTTP responder
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Answers every connection with the same status and body, and keeps what it
/// was sent.
pub struct CannedServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let body = body.clone();
                tokio::spawn(async move {
                    let mut stream = stream;
                    if let Some(request) = read_request(&mut stream).await {
                        recorded.lock().unwrap().push(request);
                        write_response(&mut stream, status, &body).await;
                    }
                });
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        if !read_more(stream, &mut buf).await {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let mut rest = buf.split_off(header_end + 4);
    let header = |name: &str| headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());

    let request_body = if let Some(length) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        while rest.len() < length {
            if !read_more(stream, &mut rest).await {
                break;
            }
        }
        rest.truncate(length);
        rest
    } else if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        read_chunked(stream, rest).await
    } else {
        Vec::new()
    };

    Some(RecordedRequest { request_line, headers, body: request_body })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        if status < 400 { "OK" } else { "Error" },
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_chunked(stream: &mut TcpStream, mut buf: Vec<u8>) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let line_end = loop {
            if let Some(pos) = find(&buf, b"\r\n") {
                break pos;
            }
            if !read_more(stream, &mut buf).await {
                return body;
            }
        };
        let size_text = String::from_utf8_lossy(&buf[..line_end]).into_owned();
        let size = usize::from_str_radix(size_text.split(';').next().unwrap_or("0").trim(), 16).unwrap_or(0);
        buf.drain(..line_end + 2);
        if size == 0 {
            return body;
        }
        while buf.len() < size + 2 {
            if !read_more(stream, &mut buf).await {
                return body;
            }
        }
        body.extend_from_slice(&buf[..size]);
        buf.drain(..size + 2);
    }
}

async fn read_more(stream: &mut TcpStream, buf: &mut Vec<u8>) -> bool {
    let mut chunk = [0u8; 4096];
    match stream.read(&mut chunk).await {
        Ok(0) | Err(_) => false,
        Ok(n) => {
            buf.extend_from_slice(&chunk[..n]);
            true
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// A local address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
