//! Page sources: where per-page raw text comes from.
//!
//! The pipeline does not parse document formats itself — extraction is a
//! collaborator behind the [`PageSource`] trait, which hands over the full
//! ordered list of page texts or fails fatally (corrupt/unreadable input
//! produces no partial output). Any PDF text extractor can sit behind this
//! trait; the crate ships [`TextFileSource`] for the common case of text that
//! was already extracted to a file, using the form-feed character that
//! extractors such as `pdftotext` emit between pages.

use crate::error::PdfTransError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// An ordered supplier of per-page raw text.
///
/// `load_pages` returns every page up front, in document order; the pipeline
/// never re-requests or reorders pages. An `Err` is fatal to the whole run.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Load all pages, in order. Index 0 is page 1.
    async fn load_pages(&self) -> Result<Vec<String>, PdfTransError>;

    /// Human-readable description of the source, used in status messages.
    fn describe(&self) -> String;
}

/// A UTF-8 text file with form-feed (`\u{000C}`) page breaks.
///
/// A file without any form feed is treated as a single page.
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for TextFileSource {
    async fn load_pages(&self) -> Result<Vec<String>, PdfTransError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfTransError::FileNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(PdfTransError::PermissionDenied {
                    path: self.path.clone(),
                })
            }
            Err(e) => {
                return Err(PdfTransError::ExtractionFailed {
                    detail: format!("{}: {e}", self.path.display()),
                })
            }
        };

        let text = String::from_utf8(bytes).map_err(|_| PdfTransError::NotUtf8 {
            path: self.path.clone(),
        })?;

        let pages: Vec<String> = split_form_feed_pages(&text);
        debug!("loaded {} pages from {}", pages.len(), self.path.display());
        Ok(pages)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Split extracted text into pages at form-feed characters.
///
/// The trailing empty page that a final form feed would produce is dropped
/// (extractors terminate the last page with one); interior empty pages are
/// kept so page numbering stays aligned with the source document.
pub fn split_form_feed_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\u{000C}').map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}

/// A fixed in-memory page list, mainly for tests and embedding callers that
/// already hold extracted text.
pub struct StaticPages {
    pages: Vec<String>,
}

impl StaticPages {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn load_pages(&self) -> Result<Vec<String>, PdfTransError> {
        Ok(self.pages.clone())
    }

    fn describe(&self) -> String {
        format!("<{} in-memory pages>", self.pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn form_feed_splits_pages_and_drops_trailing_empty() {
        assert_eq!(
            split_form_feed_pages("page one\u{000C}page two\u{000C}"),
            vec!["page one", "page two"]
        );
    }

    #[test]
    fn interior_empty_page_is_kept() {
        assert_eq!(
            split_form_feed_pages("a\u{000C}\u{000C}c"),
            vec!["a", "", "c"]
        );
    }

    #[test]
    fn no_form_feed_is_a_single_page() {
        assert_eq!(split_form_feed_pages("just text"), vec!["just text"]);
    }

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let src = TextFileSource::new("/definitely/not/a/real/file.txt");
        let err = src.load_pages().await.unwrap_err();
        assert!(matches!(err, PdfTransError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn non_utf8_file_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0xFF, 0xFE, 0x80, 0x80]).unwrap();
        let src = TextFileSource::new(tmp.path());
        let err = src.load_pages().await.unwrap_err();
        assert!(matches!(err, PdfTransError::NotUtf8 { .. }));
    }

    #[tokio::test]
    async fn reads_pages_from_a_text_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all("first page\u{000C}second page".as_bytes())
            .unwrap();
        let src = TextFileSource::new(tmp.path());
        let pages = src.load_pages().await.unwrap();
        assert_eq!(pages, vec!["first page", "second page"]);
    }
}
