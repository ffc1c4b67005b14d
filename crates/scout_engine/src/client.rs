use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use scout_logging::{scout_debug, scout_info, scout_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::wire::{BatchRequestBody, BatchResponseBody};
use crate::{CompanyResult, FailureKind, SubmitError};

pub const BATCH_PATH: &str = "/analyst2/scrape-linkedin";
pub const GATHER_PATH: &str = "/gather-info";
pub const EXTRACT_TEXT_PATH: &str = "/extract-text";

const BATCH_FALLBACK_MESSAGE: &str = "Failed to scrape LinkedIn URLs";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline, enforced on the client side.
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5002".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Sends one batch of targets and returns one row per target.
#[async_trait::async_trait]
pub trait BatchClient: Send + Sync {
    async fn submit(&self, targets: &[String]) -> Result<Vec<CompanyResult>, SubmitError>;
}

/// Status and raw body of a completed exchange.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SubmitError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| SubmitError::new(FailureKind::Decode, err.to_string()))
    }

    pub fn status_error(&self) -> SubmitError {
        SubmitError::new(FailureKind::HttpStatus(self.status), self.text())
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, SubmitError> {
        let joined = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined)
            .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, format!("{joined}: {err}")))
    }

    /// POSTs `body` as JSON and reads the full response, all under the
    /// request deadline. Expiry drops the in-flight request.
    ///
    /// A 2xx body over `max_response_bytes` is rejected as `TooLarge`; any
    /// other body is cut at the cap so the status still reaches the caller.
    pub(crate) async fn post_json<B>(&self, path: &str, body: &B) -> Result<RawResponse, SubmitError>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(path)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| SubmitError::new(FailureKind::Decode, err.to_string()))?;
        scout_debug!("POST {} ({} bytes)", url, payload.len());

        let exchange = async {
            let response = self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await
                .map_err(map_reqwest_error)?;

            let status = response.status().as_u16();
            let truncate = !response.status().is_success();
            let max_bytes = self.settings.max_response_bytes;
            if let Some(content_len) = response.content_length() {
                if content_len > max_bytes && !truncate {
                    return Err(SubmitError::new(
                        FailureKind::TooLarge {
                            max_bytes,
                            actual: Some(content_len),
                        },
                        "response too large",
                    ));
                }
            }

            let mut body = Vec::new();
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(map_reqwest_error)?;
                let next_len = body.len() as u64 + chunk.len() as u64;
                if next_len > max_bytes && truncate {
                    let room = (max_bytes as usize).saturating_sub(body.len());
                    body.extend_from_slice(&chunk[..room.min(chunk.len())]);
                    scout_debug!("Error body from {} cut at {} bytes", url, max_bytes);
                    break;
                }
                if next_len > max_bytes {
                    return Err(SubmitError::new(
                        FailureKind::TooLarge {
                            max_bytes,
                            actual: Some(next_len),
                        },
                        "response too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }
            Ok(RawResponse { status, body })
        };

        match tokio::time::timeout(self.settings.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                scout_warn!(
                    "POST {} cancelled after {:?}",
                    url,
                    self.settings.request_timeout
                );
                Err(SubmitError::new(
                    FailureKind::Timeout,
                    format!("no response within {:?}", self.settings.request_timeout),
                ))
            }
        }
    }
}

#[async_trait::async_trait]
impl BatchClient for ReqwestClient {
    async fn submit(&self, targets: &[String]) -> Result<Vec<CompanyResult>, SubmitError> {
        if targets.is_empty() {
            return Err(SubmitError::new(
                FailureKind::Validation,
                "no targets supplied",
            ));
        }

        let raw = self
            .post_json(BATCH_PATH, &BatchRequestBody { urls: targets })
            .await?;
        if !raw.is_success() {
            return Err(raw.status_error());
        }

        let body: BatchResponseBody = raw.decode()?;
        if !body.success {
            let message = body
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| BATCH_FALLBACK_MESSAGE.to_string());
            return Err(SubmitError::new(FailureKind::Application, message));
        }

        let results: Vec<CompanyResult> = body
            .results
            .ok_or_else(|| SubmitError::new(FailureKind::Decode, "response is missing results"))?
            .into_iter()
            .map(CompanyResult::from)
            .collect();
        if results.len() != targets.len() {
            scout_warn!(
                "Batch returned {} rows for {} targets",
                results.len(),
                targets.len()
            );
        }
        scout_info!("Batch of {} targets completed", targets.len());
        Ok(results)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return SubmitError::new(
            FailureKind::Network,
            format!("Failed to connect to server. Make sure the server is running. ({err})"),
        );
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
