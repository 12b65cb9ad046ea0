//! Configuration types for page-by-page translation.
//!
//! All pipeline behaviour is controlled through [`TranslationConfig`], built
//! via its [`TranslationConfigBuilder`]. Keeping every knob in one struct
//! makes it trivial to share configs across tasks, log them, and diff two
//! runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::PdfTransError;
use crate::events::EventSender;
use crate::pipeline::client::TranslationBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// The fixed source/target language pair for one run.
///
/// The MyMemory service identifies a pair with a single `"en|ja"`-style
/// string; [`LanguagePair::langpair`] renders that wire value. The pair is
/// configuration, not per-call state: one pipeline run translates exactly one
/// direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    /// ISO 639-1 code of the language pages are translated *from*.
    pub source: String,
    /// ISO 639-1 code of the language pages are translated *to*.
    pub target: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: "en".to_string(),
            target: "ja".to_string(),
        }
    }
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Render the `langpair` query value, e.g. `"en|ja"`.
    pub fn langpair(&self) -> String {
        format!("{}|{}", self.source, self.target)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.source, self.target)
    }
}

/// Configuration for a page-by-page translation run.
///
/// Built via [`TranslationConfig::builder()`] or
/// [`TranslationConfig::default()`].
///
/// # Example
/// ```rust
/// use pdftrans::{LanguagePair, TranslationConfig};
///
/// let config = TranslationConfig::builder()
///     .languages(LanguagePair::new("en", "ja"))
///     .max_attempts(3)
///     .api_timeout_secs(15)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct TranslationConfig {
    /// Source/target language pair. Default: `en` → `ja`.
    pub languages: LanguagePair,

    /// Translation service endpoint. Default: the MyMemory GET API.
    pub endpoint: String,

    /// Total request attempts per chunk (first try included). Default: 3.
    ///
    /// The service is free and rate-limited, so transient non-200 answers are
    /// routine. After the budget is spent the chunk is kept untranslated
    /// rather than aborting the run.
    pub max_attempts: u32,

    /// Delay before each retry, in milliseconds. Default: 1000.
    pub retry_delay_ms: u64,

    /// Pause after every successful request, in milliseconds. Default: 300.
    ///
    /// The service publishes no hard rate limit; spacing requests out keeps a
    /// long document from tripping its informal one. Applied only on success,
    /// never on the fallback return.
    pub throttle_ms: u64,

    /// Per-request timeout in seconds. Default: 15.
    pub api_timeout_secs: u64,

    /// Maximum chunk length in Unicode scalar values. Default: 500.
    ///
    /// The service rejects longer inputs; sentences above this are cut into
    /// fixed-size runs that reassemble exactly by concatenation.
    pub max_chunk_chars: usize,

    /// ASCII ratio above which a page counts as source-language. Default: 0.7.
    ///
    /// Strict comparison: a page at exactly the threshold passes through.
    pub ascii_ratio_threshold: f64,

    /// Pre-constructed translation backend. Default: none.
    ///
    /// Takes precedence over the built-in MyMemory HTTP backend. Useful in
    /// tests and when the caller needs a different service or middleware
    /// (caching, metering) around the real one.
    pub backend: Option<Arc<dyn TranslationBackend>>,

    /// Event channel sender for progress/status/result events. Default: none.
    pub events: Option<EventSender>,

    /// Cooperative cancellation flag, checked between pages and between
    /// chunks. Default: never set.
    pub cancel: Arc<AtomicBool>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            languages: LanguagePair::default(),
            endpoint: "https://api.mymemory.translated.net/get".to_string(),
            max_attempts: 3,
            retry_delay_ms: 1000,
            throttle_ms: 300,
            api_timeout_secs: 15,
            max_chunk_chars: 500,
            ascii_ratio_threshold: 0.7,
            backend: None,
            events: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("languages", &self.languages)
            .field("endpoint", &self.endpoint)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("throttle_ms", &self.throttle_ms)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_chunk_chars", &self.max_chunk_chars)
            .field("ascii_ratio_threshold", &self.ascii_ratio_threshold)
            .field("backend", &self.backend.as_ref().map(|_| "<dyn TranslationBackend>"))
            .field("events", &self.events.as_ref().map(|_| "<EventSender>"))
            .finish()
    }
}

impl TranslationConfig {
    /// Create a new builder for `TranslationConfig`.
    pub fn builder() -> TranslationConfigBuilder {
        TranslationConfigBuilder {
            config: Self::default(),
        }
    }

    /// Clone the cancellation flag so a caller can cancel a running pipeline.
    ///
    /// Setting the returned flag makes the pipeline stop at the next page or
    /// chunk boundary and return [`PdfTransError::Cancelled`].
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }
}

/// Builder for [`TranslationConfig`].
#[derive(Debug)]
pub struct TranslationConfigBuilder {
    config: TranslationConfig,
}

impl TranslationConfigBuilder {
    pub fn languages(mut self, pair: LanguagePair) -> Self {
        self.config.languages = pair;
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n.max(1);
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.config.retry_delay_ms = ms;
        self
    }

    pub fn throttle_ms(mut self, ms: u64) -> Self {
        self.config.throttle_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn max_chunk_chars(mut self, n: usize) -> Self {
        self.config.max_chunk_chars = n.max(1);
        self
    }

    pub fn ascii_ratio_threshold(mut self, ratio: f64) -> Self {
        self.config.ascii_ratio_threshold = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn TranslationBackend>) -> Self {
        self.config.backend = Some(backend);
        self
    }

    pub fn events(mut self, tx: EventSender) -> Self {
        self.config.events = Some(tx);
        self
    }

    pub fn cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.config.cancel = flag;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TranslationConfig, PdfTransError> {
        let c = &self.config;
        if c.languages.source.is_empty() || c.languages.target.is_empty() {
            return Err(PdfTransError::InvalidConfig(
                "Language codes must be non-empty".into(),
            ));
        }
        if c.languages.source == c.languages.target {
            return Err(PdfTransError::InvalidConfig(format!(
                "Source and target language are both '{}'",
                c.languages.source
            )));
        }
        if c.endpoint.is_empty() {
            return Err(PdfTransError::InvalidConfig("Endpoint must be set".into()));
        }
        if c.max_attempts == 0 {
            return Err(PdfTransError::InvalidConfig(
                "max_attempts must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
