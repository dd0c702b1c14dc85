use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type of a local file judged by its extension, the same way a browser
/// fills in `File.type` for a picked file.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("zip") => "application/zip",
        _ => FALLBACK_MIME,
    }
}

pub fn is_pdf(path: &Path) -> bool {
    content_type_for(path) == PDF_MIME
}
