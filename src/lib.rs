//! # pdftrans
//!
//! Turn text extracted from a PDF into a readable bilingual document,
//! translating page by page with the free MyMemory API.
//!
//! ## Why this crate?
//!
//! Text pulled out of a PDF is wrapped at the printed line width, with words
//! hyphen-split across lines and sentences scattered over fragments. Feeding
//! those fragments to a translation service produces garbage. This crate
//! first decides per page whether translation is needed at all (an
//! English/Japanese ASCII-ratio heuristic), then rebuilds logical paragraphs,
//! splits them into sentences and size-bounded chunks the service accepts,
//! and calls the service with bounded retries — degrading to the original
//! text for a chunk rather than losing a whole document to one bad request.
//!
//! ## Pipeline Overview
//!
//! ```text
//! extracted pages
//!  │
//!  ├─ 1. Input        ordered per-page raw text (PageSource collaborator)
//!  ├─ 2. Classify     ASCII ratio > 0.7 → translate, else pass through
//!  ├─ 3. Reconstruct  rejoin hyphen splits and wrapped lines into paragraphs
//!  ├─ 4. Segment      sentences, then chunks of ≤ 500 code points
//!  ├─ 5. Translate    one GET per chunk, 3 attempts, fallback to original
//!  └─ 6. Assemble     page banners + ordered concatenation
//! ```
//!
//! Everything runs strictly sequentially — serialization plus the client's
//! post-success pause is the rate-limit strategy for the free service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftrans::{translate_file, TranslationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TranslationConfig::default(); // en → ja, MyMemory
//!     let output = translate_file("extracted.txt", &config).await?;
//!     println!("{}", output.text);
//!     eprintln!(
//!         "{} pages, {} chunks ({} kept untranslated)",
//!         output.stats.total_pages,
//!         output.stats.chunks_total,
//!         output.stats.chunks_fallback
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Progress events
//!
//! Attach a `tokio` unbounded sender via
//! [`TranslationConfigBuilder::events`](crate::config::TranslationConfigBuilder::events)
//! and the pipeline emits ordered [`PipelineEvent`]s (progress 0–100, status
//! lines, the final document, or a fatal error) while it runs — the CLI's
//! progress bar is built on nothing else.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftrans` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdftrans = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod pipeline;
pub mod translate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LanguagePair, TranslationConfig, TranslationConfigBuilder};
pub use error::{PdfTransError, RequestError};
pub use events::{EventSender, PipelineEvent};
pub use output::{PageReport, TranslationOutput, TranslationStats};
pub use pipeline::client::{TranslationBackend, TranslationClient, TranslationOutcome};
pub use pipeline::input::{PageSource, StaticPages, TextFileSource};
pub use translate::{translate_document, translate_file, translate_sync, translate_to_file};
