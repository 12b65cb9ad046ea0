//! Output types returned by the translation pipeline.
//!
//! [`TranslationOutput`] is what callers get back on success: the assembled
//! document text plus per-page reports and run statistics. The reports exist
//! for observability — the document itself does not flag which chunks fell
//! back to the original text, so `chunks_fallback` is the only way a caller
//! can tell a clean run from a degraded one.

use serde::{Deserialize, Serialize};

/// The result of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOutput {
    /// The full assembled bilingual document.
    pub text: String,
    /// Per-page reports, in page order.
    pub pages: Vec<PageReport>,
    /// Aggregate statistics for the run.
    pub stats: TranslationStats,
}

/// What happened to a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// 1-based page number, matching the source document.
    pub page_num: usize,
    /// The page's output text (translated or passed through). Set exactly
    /// once by the pipeline, never mutated after.
    pub text: String,
    /// True if the page went through the translation path; false for
    /// pass-through pages already in the target language.
    pub translated: bool,
    /// Chunks submitted for this page (0 for pass-through pages).
    pub chunks_total: usize,
    /// Chunks that kept their original text after retry exhaustion.
    pub chunks_fallback: usize,
    /// Wall-clock time spent on this page.
    pub duration_ms: u64,
}

/// Aggregate statistics for a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationStats {
    pub total_pages: usize,
    pub translated_pages: usize,
    pub passthrough_pages: usize,
    pub chunks_total: usize,
    pub chunks_fallback: usize,
    pub total_duration_ms: u64,
}

impl TranslationStats {
    /// True when every submitted chunk actually got translated.
    pub fn is_fully_translated(&self) -> bool {
        self.chunks_fallback == 0
    }
}
