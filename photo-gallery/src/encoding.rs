//! Base64 and data-URI helpers
//!
//! Web locators are turned into `data:<mime>;base64,<payload>` strings so
//! their content can be written to the content store like native files.

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::CONTENT_TYPE;
use std::path::Path;

pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

const BASE64_MARKER: &str = ";base64,";

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(u16),
    Io(std::io::Error),
    InvalidDataUrl(String),
    Other(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "HTTP error: {}", e),
            FetchError::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            FetchError::Io(e) => write!(f, "IO error: {}", e),
            FetchError::InvalidDataUrl(msg) => write!(f, "Invalid data URL: {}", msg),
            FetchError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err)
    }
}

/// Data URI for base64 JPEG content as stored in the content store
pub fn jpeg_data_url(base64: &str) -> String {
    format!("{}{}", JPEG_DATA_URL_PREFIX, base64)
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{}{}{}",
        mime,
        BASE64_MARKER,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Returns the base64 payload of a data URI, or the input if it has no header
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some(idx) = data.find(BASE64_MARKER) {
            return &data[idx + BASE64_MARKER.len()..];
        }
    }
    data
}

/// Decode plain base64 or a base64 data URI
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(strip_data_url(data).trim())
}

pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Simple MIME type guess based on the file extension
pub fn guess_mime_from_ext(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") | Some("heif") => "image/heic",
        _ => "image/jpeg",
    }
}

/// Load a web locator and return its content as a base64 data URI
///
/// Supports `http(s)://` (fetched once, no retry), `file://` and `data:`
/// locators. Errors are logged before they are returned.
pub async fn blob_locator_to_base64(
    client: &reqwest::Client,
    locator: &str,
) -> Result<String, FetchError> {
    let result = load_data_url(client, locator).await;
    if let Err(e) = &result {
        log::error!("Failed to convert {} to base64: {}", locator, e);
    }
    result
}

async fn load_data_url(client: &reqwest::Client, locator: &str) -> Result<String, FetchError> {
    if locator.starts_with("data:") {
        if !locator.contains(BASE64_MARKER) {
            return Err(FetchError::InvalidDataUrl(
                "only base64 data URLs are supported".to_string(),
            ));
        }
        decode_base64(locator).map_err(|e| FetchError::InvalidDataUrl(e.to_string()))?;
        return Ok(locator.to_string());
    }

    if let Some(path) = locator.strip_prefix("file://") {
        let mime = guess_mime_from_ext(Path::new(path));
        let path = path.to_string();
        let bytes = tokio::task::spawn_blocking(move || std::fs::read(path))
            .await
            .map_err(|e| FetchError::Other(format!("Task join error: {}", e)))??;
        return Ok(encode_data_url(mime, &bytes));
    }

    let response = client.get(locator).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let mime = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = response.bytes().await?;
    log::debug!("Fetched {} bytes ({}) from {}", bytes.len(), mime, locator);

    Ok(encode_data_url(&mime, &bytes))
}
