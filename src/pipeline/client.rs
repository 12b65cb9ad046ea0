//! Translation client: drive the remote call with retry and throttle.
//!
//! This module is intentionally thin — the wire format lives in
//! [`MyMemoryBackend`], the resilience policy in [`TranslationClient`], so
//! either can change without touching the other.
//!
//! ## Retry Strategy
//!
//! The MyMemory API is free and informally rate-limited, so transient
//! failures (non-200 `responseStatus`, timeouts, connection resets) are
//! routine. Each chunk gets a fixed budget of attempts with a flat 1 s delay
//! between them; when the budget is spent the client returns the original
//! chunk as a [`TranslationOutcome`] with `was_translated = false` instead of
//! an error, so one bad chunk degrades the output rather than aborting a
//! long run. After every successful call the client pauses briefly to stay
//! under the service's informal rate limit; the fallback return skips the
//! pause.

use crate::config::TranslationConfig;
use crate::error::{PdfTransError, RequestError};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// The result of translating one chunk.
///
/// `was_translated = false` means every attempt failed and `text` is the
/// original chunk, passed through so the document stays complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub text: String,
    pub was_translated: bool,
}

/// One translation request against a remote service.
///
/// Implementations perform exactly one attempt with no retry logic of their
/// own; [`TranslationClient`] owns the policy. The seam exists so tests can
/// substitute deterministic stubs for the network.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate one chunk, returning the translated text on success.
    async fn request(&self, chunk: &str) -> Result<String, RequestError>;
}

// ── MyMemory wire format ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    response_status: i64,
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: String,
}

/// HTTP backend for the MyMemory GET API.
///
/// One GET per chunk with query parameters `q` (the chunk text) and
/// `langpair` (e.g. `"en|ja"`); the response is a JSON object carrying
/// `responseStatus` and `responseData.translatedText`. Success requires
/// `responseStatus == 200`.
pub struct MyMemoryBackend {
    client: reqwest::Client,
    endpoint: String,
    langpair: String,
}

impl MyMemoryBackend {
    /// Build the backend from config: endpoint, language pair, and the
    /// per-request timeout baked into the HTTP client.
    pub fn new(config: &TranslationConfig) -> Result<Self, PdfTransError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| PdfTransError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            langpair: config.languages.langpair(),
        })
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryBackend {
    async fn request(&self, chunk: &str) -> Result<String, RequestError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", chunk), ("langpair", &self.langpair)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| RequestError::MalformedPayload(e.to_string()))?;

        if parsed.response_status != 200 {
            return Err(RequestError::ServiceStatus(parsed.response_status));
        }
        match parsed.response_data {
            Some(data) => Ok(data.translated_text),
            None => Err(RequestError::MalformedPayload(
                "responseData missing on a 200 response".into(),
            )),
        }
    }
}

// ── Client: retry-then-fallback policy ────────────────────────────────────

/// Translates single chunks with bounded retries and a post-success pause.
///
/// Holds no state between calls beyond the backend and the fixed policy
/// values; rate-limit compliance comes purely from serialization (the caller
/// is strictly sequential) plus the delays here.
pub struct TranslationClient {
    backend: Arc<dyn TranslationBackend>,
    max_attempts: u32,
    retry_delay: Duration,
    throttle: Duration,
}

impl TranslationClient {
    /// Wrap an arbitrary backend with the retry policy from `config`.
    pub fn new(backend: Arc<dyn TranslationBackend>, config: &TranslationConfig) -> Self {
        Self {
            backend,
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            throttle: Duration::from_millis(config.throttle_ms),
        }
    }

    /// Build a client from config: a caller-supplied backend when one is
    /// set, otherwise the MyMemory HTTP backend.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, PdfTransError> {
        let backend: Arc<dyn TranslationBackend> = match &config.backend {
            Some(backend) => Arc::clone(backend),
            None => Arc::new(MyMemoryBackend::new(config)?),
        };
        Ok(Self::new(backend, config))
    }

    /// Translate one chunk.
    ///
    /// The chunk is trimmed before submission; callers must not submit
    /// blank chunks (they skip them instead). Never fails: after
    /// `max_attempts` failed tries the original chunk comes back with
    /// `was_translated = false`.
    pub async fn translate(&self, chunk: &str) -> TranslationOutcome {
        let mut last_err: Option<RequestError> = None;

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                sleep(self.retry_delay).await;
            }

            match self.backend.request(chunk.trim()).await {
                Ok(text) => {
                    debug!("chunk translated on attempt {attempt}");
                    // Courtesy pause so back-to-back chunks stay under the
                    // service's informal rate limit.
                    sleep(self.throttle).await;
                    return TranslationOutcome {
                        text,
                        was_translated: true,
                    };
                }
                Err(e) => {
                    warn!(
                        "translation attempt {attempt}/{} failed: {e}",
                        self.max_attempts
                    );
                    last_err = Some(e);
                }
            }
        }

        if let Some(e) = last_err {
            warn!("all {} attempts failed, keeping original text: {e}", self.max_attempts);
        }
        TranslationOutcome {
            text: chunk.to_string(),
            was_translated: false,
        }
    }
}
