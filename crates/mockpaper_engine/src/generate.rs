use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use mockpaper_logging::{client_debug, client_info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{EngineEvent, FailureKind, GenerateError, GenerateRequest};

/// Default location of the generation service. Must match
/// `mockpaper_core::DEFAULT_BASE_URL`.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Most of an error body read when looking for a detail message.
const ERROR_BODY_LIMIT: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Generation can take minutes; no overall deadline unless configured.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 256 * 1024 * 1024,
        }
    }
}

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Raw archive bytes returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArchive {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedArchive, GenerateError>;

    /// Ask the service whether it is up.
    async fn health(&self) -> Result<bool, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GeneratorSettings,
    client: reqwest::Client,
}

impl ReqwestGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerateError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, GenerateError> {
        let raw = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&raw)
            .map_err(|err| GenerateError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn build_form(&self, request: &GenerateRequest) -> Result<Form, GenerateError> {
        let bytes = tokio::fs::read(&request.file_path).await.map_err(|err| {
            GenerateError::new(
                FailureKind::Io,
                format!("could not read {}: {err}", request.file_path.display()),
            )
        })?;
        client_debug!(
            "Uploading {} ({} bytes)",
            request.file_name,
            bytes.len()
        );

        let part = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(mime_for(&request.file_path))
            .map_err(map_reqwest_error)?;

        let mut form = Form::new().part("file", part);
        for (name, value) in &request.fields {
            form = form.text(name.clone(), value.clone());
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedArchive, GenerateError> {
        let url = self.endpoint("generate")?;
        let form = self.build_form(request).await?;

        client_info!("POST {}", url);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let limit = ERROR_BODY_LIMIT.min(self.settings.max_bytes);
            let body = read_truncated(response, limit).await;
            let message = error_detail(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(GenerateError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(GenerateError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(GeneratedArchive {
            bytes,
            content_type,
        })
    }

    async fn health(&self) -> Result<bool, GenerateError> {
        #[derive(Deserialize)]
        struct Health {
            ok: bool,
        }

        let url = self.endpoint("healthz")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let health: Health = serde_json::from_slice(&body)
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(health.ok)
    }
}

/// Read at most `limit` bytes of a body. A body that breaks off early is
/// returned as far as it got.
async fn read_truncated(response: reqwest::Response, limit: u64) -> Vec<u8> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(Ok(chunk)) = stream.next().await {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    body
}

/// Pull a human-readable reason out of a JSON error body.
///
/// The service answers with `{"detail": ...}` for pipeline failures and
/// `{"status": "error", "message": ...}` for missing credentials.
fn error_detail(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
        message: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(detail)) => Some(detail),
        Some(other) => Some(other.to_string()),
        None => parsed.message,
    }
    .filter(|text| !text.trim().is_empty())
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return GenerateError::new(FailureKind::InvalidUrl, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
