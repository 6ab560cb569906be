use std::path::PathBuf;
use std::time::Duration;

use converter_logging::{conv_debug, conv_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::{ClientError, FailureKind};

/// Multipart field the conversion endpoint reads the CSV from.
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` leaves requests bounded only by the
    /// transport.
    pub request_timeout: Option<Duration>,
    pub max_download_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_download_bytes: 100 * 1024 * 1024,
        }
    }
}

/// A local file to send to the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
}

#[async_trait::async_trait]
pub trait ConversionClient: Send + Sync {
    /// Uploads the file and returns the raw response body.
    async fn convert(&self, url: &str, upload: &Upload) -> Result<String, ClientError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError>;

    async fn list_files(&self, url: &str) -> Result<Vec<String>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_ok(&self, url: &str) -> Result<reqwest::Response, ClientError> {
        let parsed = parse_url(url)?;
        let response = self
            .build_client()?
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response).await
    }
}

#[async_trait::async_trait]
impl ConversionClient for ReqwestClient {
    async fn convert(&self, url: &str, upload: &Upload) -> Result<String, ClientError> {
        let parsed = parse_url(url)?;
        let bytes = tokio::fs::read(&upload.path).await.map_err(|err| {
            ClientError::new(
                FailureKind::LocalFile,
                format!("{}: {err}", upload.path.display()),
            )
        })?;
        conv_info!(
            "POST {} file={} bytes={}",
            parsed,
            upload.file_name,
            bytes.len()
        );

        let mut part = Part::bytes(bytes).file_name(upload.file_name.clone());
        if !upload.mime.is_empty() {
            part = part
                .mime_str(&upload.mime)
                .map_err(|err| ClientError::new(FailureKind::LocalFile, err.to_string()))?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .build_client()?
            .post(parsed)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        response.text().await.map_err(map_reqwest_error)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.get_ok(url).await?;
        let max_bytes = self.settings.max_download_bytes;

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        conv_debug!("GET {} returned {} bytes", url, bytes.len());
        Ok(bytes)
    }

    async fn list_files(&self, url: &str) -> Result<Vec<String>, ClientError> {
        let response = self.get_ok(url).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| ClientError::new(FailureKind::InvalidResponse, err.to_string()))
    }
}

fn parse_url(url: &str) -> Result<Url, ClientError> {
    Url::parse(url).map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
}

/// Turns a non-2xx response into an error carrying its body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::new(
        FailureKind::HttpStatus(status.as_u16()),
        body,
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
