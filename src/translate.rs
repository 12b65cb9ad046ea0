//! Pipeline orchestration: the page loop and the public entry points.
//!
//! ## Why strictly sequential?
//!
//! Pages, sentences, and chunks are all processed one at a time, in order.
//! That is deliberate: the free translation service tolerates only a gentle
//! request rate, and serialization (plus the client's post-success pause) is
//! the whole rate-limit strategy. It also makes the ordering guarantee
//! trivial — outputs appear in page order because nothing runs concurrently.
//! The caller keeps its UI responsive by running the pipeline as a spawned
//! task and draining the event channel.

use crate::config::TranslationConfig;
use crate::error::PdfTransError;
use crate::events::{emit, PipelineEvent};
use crate::output::{PageReport, TranslationOutput, TranslationStats};
use crate::pipeline::{assemble, classify, client, input, reconstruct, segment};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, info};

/// Translate every page supplied by `source` into one bilingual document.
///
/// This is the primary entry point for the library. Pages classified as
/// target language pass through unchanged; source-language pages are
/// reconstructed, segmented, and translated chunk by chunk.
///
/// # Errors
/// Returns `Err(PdfTransError)` only for fatal conditions: page extraction
/// failure, cancellation, invalid setup. Translation-service failures never
/// surface here — affected chunks keep their original text and are counted
/// in `stats.chunks_fallback`.
pub async fn translate_document(
    source: &dyn input::PageSource,
    config: &TranslationConfig,
) -> Result<TranslationOutput, PdfTransError> {
    let total_start = Instant::now();
    info!("Starting translation run: {}", source.describe());
    emit(
        &config.events,
        PipelineEvent::Status(format!("Loading {}...", source.describe())),
    );

    // ── Step 1: Load all pages, in order ─────────────────────────────────
    let raw_pages = match source.load_pages().await {
        Ok(pages) => pages,
        Err(e) => return Err(fail(config, e)),
    };
    let total_pages = raw_pages.len();
    info!("Document has {} pages", total_pages);
    emit(
        &config.events,
        PipelineEvent::Status(format!("Total pages: {total_pages}")),
    );

    // ── Step 2: Build the translation client ─────────────────────────────
    let client = match client::TranslationClient::from_config(config) {
        Ok(c) => c,
        Err(e) => return Err(fail(config, e)),
    };

    // ── Step 3: Per-page loop ────────────────────────────────────────────
    let mut pages: Vec<PageReport> = Vec::with_capacity(total_pages);

    for (index, raw) in raw_pages.iter().enumerate() {
        let page_num = index + 1;

        if config.cancel.load(Ordering::SeqCst) {
            return Err(fail(
                config,
                PdfTransError::Cancelled {
                    completed_pages: index,
                    total_pages,
                },
            ));
        }

        let page_start = Instant::now();
        let needs_translation =
            classify::is_source_language(raw, config.ascii_ratio_threshold);

        let report = if needs_translation {
            emit(
                &config.events,
                PipelineEvent::Status(format!("Translating page {page_num}/{total_pages}...")),
            );
            let (text, chunks_total, chunks_fallback) =
                match translate_page(&client, raw, config, index, total_pages).await {
                    Ok(r) => r,
                    Err(e) => return Err(fail(config, e)),
                };
            PageReport {
                page_num,
                text,
                translated: true,
                chunks_total,
                chunks_fallback,
                duration_ms: page_start.elapsed().as_millis() as u64,
            }
        } else {
            emit(
                &config.events,
                PipelineEvent::Status(format!("Page {page_num}/{total_pages} (pass-through)")),
            );
            PageReport {
                page_num,
                text: raw.clone(),
                translated: false,
                chunks_total: 0,
                chunks_fallback: 0,
                duration_ms: page_start.elapsed().as_millis() as u64,
            }
        };

        debug!(
            "Page {}/{} done: translated={}, chunks={}, fallback={}",
            page_num, total_pages, report.translated, report.chunks_total, report.chunks_fallback
        );
        pages.push(report);

        emit(
            &config.events,
            PipelineEvent::Progress(progress_percent(page_num, total_pages)),
        );
    }

    // ── Step 4: Assemble the final document ──────────────────────────────
    let text = assemble::assemble_document(&pages);

    let stats = TranslationStats {
        total_pages,
        translated_pages: pages.iter().filter(|p| p.translated).count(),
        passthrough_pages: pages.iter().filter(|p| !p.translated).count(),
        chunks_total: pages.iter().map(|p| p.chunks_total).sum(),
        chunks_fallback: pages.iter().map(|p| p.chunks_fallback).sum(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Translation complete: {}/{} pages translated, {} chunks ({} fallback), {}ms",
        stats.translated_pages,
        stats.total_pages,
        stats.chunks_total,
        stats.chunks_fallback,
        stats.total_duration_ms
    );

    emit(&config.events, PipelineEvent::Status("Complete".to_string()));
    emit(&config.events, PipelineEvent::Done(text.clone()));

    Ok(TranslationOutput { text, pages, stats })
}

/// Translate a plain-text file with form-feed page breaks.
pub async fn translate_file(
    path: impl AsRef<Path>,
    config: &TranslationConfig,
) -> Result<TranslationOutput, PdfTransError> {
    let source = input::TextFileSource::new(path.as_ref());
    translate_document(&source, config).await
}

/// Translate and write the assembled document directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn translate_to_file(
    source: &dyn input::PageSource,
    output_path: impl AsRef<Path>,
    config: &TranslationConfig,
) -> Result<TranslationStats, PdfTransError> {
    let output = translate_document(source, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PdfTransError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, &output.text).await.map_err(|e| {
        PdfTransError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
        PdfTransError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`translate_document`].
///
/// Creates a temporary tokio runtime internally.
pub fn translate_sync(
    source: &dyn input::PageSource,
    config: &TranslationConfig,
) -> Result<TranslationOutput, PdfTransError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PdfTransError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(translate_document(source, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Emit the failure event and hand the error back for propagation.
fn fail(config: &TranslationConfig, err: PdfTransError) -> PdfTransError {
    emit(&config.events, PipelineEvent::Failed(err.to_string()));
    err
}

/// Scale completed/total to a 0–100 integer.
fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed * 100) / total) as u8
}

/// Run one source-language page through reconstruct → segment → translate.
///
/// Returns the page's output text plus chunk counters. Within a paragraph,
/// translated sentence outputs are joined by plain concatenation with no
/// inserted separator. That join likely drops intended inter-sentence
/// whitespace, but changing it would change every existing downstream
/// document, so it stays as a documented compatibility point rather than a
/// silent fix. Paragraphs are joined with a single newline, and blank source
/// paragraphs survive as blank output lines.
async fn translate_page(
    client: &client::TranslationClient,
    raw: &str,
    config: &TranslationConfig,
    completed_pages: usize,
    total_pages: usize,
) -> Result<(String, usize, usize), PdfTransError> {
    let cleaned = reconstruct::reconstruct_paragraphs(raw);

    let mut out_paragraphs: Vec<String> = Vec::new();
    let mut chunks_total = 0usize;
    let mut chunks_fallback = 0usize;

    for paragraph in cleaned.split('\n') {
        if paragraph.trim().is_empty() {
            // Paragraph-boundary marker: spacing survives translation.
            out_paragraphs.push(String::new());
            continue;
        }

        let mut sentence_outputs: Vec<String> = Vec::new();
        for sentence in segment::split_sentences(paragraph) {
            for chunk in segment::chunk_sentence(&sentence, config.max_chunk_chars) {
                // Blank chunks are never submitted to the service.
                if chunk.trim().is_empty() {
                    continue;
                }
                if config.cancel.load(Ordering::SeqCst) {
                    return Err(PdfTransError::Cancelled {
                        completed_pages,
                        total_pages,
                    });
                }

                chunks_total += 1;
                let outcome = client.translate(&chunk).await;
                if !outcome.was_translated {
                    chunks_fallback += 1;
                }
                sentence_outputs.push(outcome.text);
            }
        }
        out_paragraphs.push(sentence_outputs.concat());
    }

    Ok((out_paragraphs.join("\n"), chunks_total, chunks_fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_scales_to_whole_percent() {
        assert_eq!(progress_percent(0, 3), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }
}
