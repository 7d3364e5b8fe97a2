use std::time::Duration;

use chat_logging::{chat_info, chat_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{AskRequest, AskResponse, SearchResponse, UploadResponse};
use crate::{BackendError, FailureKind, SearchHit, Turn};

/// Fixed location of the answering backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

/// The three remote calls the client relies on.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn ask(&self, turns: &[Turn]) -> Result<String, BackendError>;

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, BackendError>;

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| BackendError::new(FailureKind::Malformed, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn ask(&self, turns: &[Turn]) -> Result<String, BackendError> {
        let url = self.endpoint("ask")?;
        chat_info!("POST {} turns={}", url, turns.len());

        let response = self
            .client
            .post(url)
            .json(&AskRequest { messages: turns })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: AskResponse = self.read_json(response).await?;
        Ok(body.answer)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, BackendError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut().append_pair("q", query);
        chat_info!("GET {} query_len={}", url.path(), query.len());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: SearchResponse = self.read_json(response).await?;
        if let Some(error) = body.error.as_deref() {
            chat_warn!("search backend reported: {}", error);
        }
        Ok(body.results)
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, BackendError> {
        let url = self.endpoint("upload")?;
        chat_info!("POST {} file={} bytes={}", url, file_name, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: UploadResponse = self.read_json(response).await?;
        Ok(body.summary)
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> BackendError {
    BackendError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Malformed, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
