//! Error types for the pdftrans library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PdfTransError`] — **Fatal**: the run cannot proceed at all (pages could
//!   not be extracted, output file unwritable, invalid configuration,
//!   cancellation). Returned as `Err(PdfTransError)` from the top-level
//!   `translate*` functions; no partial document is ever produced.
//!
//! * [`RequestError`] — **Recoverable**: a single translation request failed
//!   (network error, timeout, non-200 service status, malformed payload).
//!   Handled entirely inside [`crate::pipeline::client::TranslationClient`]
//!   via retry-then-fallback; it never crosses the chunk boundary and never
//!   aborts the pipeline.
//!
//! The separation means a flaky translation service degrades the output
//! (some chunks stay untranslated) instead of killing a long run.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdftrans library.
///
/// Per-request failures use [`RequestError`] and are absorbed by the
/// translation client's fallback policy rather than propagated here.
#[derive(Debug, Error)]
pub enum PdfTransError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file is not valid UTF-8 text.
    #[error("Input file '{path}' is not UTF-8 text")]
    NotUtf8 { path: PathBuf },

    /// The extraction collaborator could not produce page text.
    #[error("Page extraction failed: {detail}")]
    ExtractionFailed { detail: String },

    // ── Run errors ────────────────────────────────────────────────────────
    /// The caller triggered the cancellation flag mid-run.
    #[error("Translation cancelled after {completed_pages} of {total_pages} pages")]
    Cancelled {
        completed_pages: usize,
        total_pages: usize,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A recoverable error for a single translation request.
///
/// Produced by a [`crate::pipeline::client::TranslationBackend`] attempt and
/// consumed by the retry loop; after the attempt budget is spent the client
/// returns the original chunk instead of surfacing this error.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport-level failure: connect error, timeout, TLS, bad HTTP status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered but reported a non-200 `responseStatus`.
    #[error("Translation service returned status {0}")]
    ServiceStatus(i64),

    /// The response body did not match the expected JSON shape.
    #[error("Malformed response payload: {0}")]
    MalformedPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_display() {
        let e = PdfTransError::Cancelled {
            completed_pages: 2,
            total_pages: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("2 of 10"), "got: {msg}");
    }

    #[test]
    fn extraction_failed_display() {
        let e = PdfTransError::ExtractionFailed {
            detail: "corrupt xref table".into(),
        };
        assert!(e.to_string().contains("corrupt xref table"));
    }

    #[test]
    fn service_status_display() {
        let e = RequestError::ServiceStatus(429);
        assert!(e.to_string().contains("429"));
    }

    #[test]
    fn malformed_payload_display() {
        let e = RequestError::MalformedPayload("missing responseData".into());
        assert!(e.to_string().contains("missing responseData"));
    }
}
