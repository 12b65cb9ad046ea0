//! End-to-end integration tests for pdftrans.
//!
//! The whole pipeline runs against in-memory page sources and stub
//! translation backends, so these tests are deterministic and make no
//! network calls. Delays are zeroed through the config so the retry tests
//! stay instant.

use async_trait::async_trait;
use pdftrans::{
    translate_document, translate_to_file, LanguagePair, PdfTransError, PipelineEvent,
    RequestError, StaticPages, TranslationBackend, TranslationConfig,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

// ── Stub backends ────────────────────────────────────────────────────────────

/// "Translates" by reversing the chunk — distinguishes translated text from
/// pass-through while keeping assertions exact.
struct ReversingBackend {
    calls: AtomicUsize,
}

impl ReversingBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TranslationBackend for ReversingBackend {
    async fn request(&self, chunk: &str) -> Result<String, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(chunk.chars().rev().collect())
    }
}

/// Always fails, driving every chunk into the fallback path.
struct DeadBackend;

#[async_trait]
impl TranslationBackend for DeadBackend {
    async fn request(&self, _chunk: &str) -> Result<String, RequestError> {
        Err(RequestError::ServiceStatus(503))
    }
}

// ── Test helpers ─────────────────────────────────────────────────────────────

fn config_with(backend: Arc<dyn TranslationBackend>) -> TranslationConfig {
    TranslationConfig::builder()
        .languages(LanguagePair::new("en", "ja"))
        .backend(backend)
        .retry_delay_ms(0)
        .throttle_ms(0)
        .build()
        .unwrap()
}

fn banner(n: usize) -> String {
    let rule = "=".repeat(50);
    format!("{rule}\nPage {n}\n{rule}")
}

// ── Core scenarios ───────────────────────────────────────────────────────────

#[tokio::test]
async fn sentences_join_with_no_separator() {
    // Two sentences, one chunk each; outputs must concatenate with nothing
    // between them.
    let source = StaticPages::new(vec!["This is great. This is bad.".into()]);
    let backend = ReversingBackend::new();
    let config = config_with(backend.clone());

    let output = translate_document(&source, &config).await.unwrap();

    let page = &output.pages[0];
    assert!(page.translated);
    assert_eq!(page.chunks_total, 2);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    assert_eq!(page.text, ".taerg si sihT.dab si sihT");
    assert_eq!(output.text, format!("{}\n{}", banner(1), page.text));
}

#[tokio::test]
async fn paragraph_boundaries_survive_translation() {
    let source = StaticPages::new(vec![
        "First paragraph\nwrapped here.\n\nSecond paragraph.".into(),
    ]);
    let config = config_with(ReversingBackend::new());

    let output = translate_document(&source, &config).await.unwrap();

    // Wrapped lines rejoined before translation, blank line kept between
    // paragraphs, paragraphs joined with a single newline.
    assert_eq!(
        output.pages[0].text,
        ".ereh depparw hpargarap tsriF\n\n.hpargarap dnoceS"
    );
}

#[tokio::test]
async fn pages_keep_document_order_regardless_of_routing() {
    let source = StaticPages::new(vec![
        "An English page with plenty of ASCII text.".into(),
        "これは日本語のページです。翻訳は不要です。".into(),
        "Another English page to translate here.".into(),
    ]);
    let config = config_with(ReversingBackend::new());

    let output = translate_document(&source, &config).await.unwrap();

    assert_eq!(output.stats.total_pages, 3);
    assert_eq!(output.stats.translated_pages, 2);
    assert_eq!(output.stats.passthrough_pages, 1);

    let p1 = output.text.find("Page 1").unwrap();
    let p2 = output.text.find("Page 2").unwrap();
    let p3 = output.text.find("Page 3").unwrap();
    assert!(p1 < p2 && p2 < p3);

    // The Japanese page passes through byte-for-byte, unreconstructed.
    assert!(!output.pages[1].translated);
    assert_eq!(output.pages[1].text, "これは日本語のページです。翻訳は不要です。");
}

#[tokio::test]
async fn extraction_failure_is_fatal_with_no_output() {
    struct BrokenSource;

    #[async_trait]
    impl pdftrans::PageSource for BrokenSource {
        async fn load_pages(&self) -> Result<Vec<String>, PdfTransError> {
            Err(PdfTransError::ExtractionFailed {
                detail: "unreadable input".into(),
            })
        }
        fn describe(&self) -> String {
            "broken".into()
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = TranslationConfig::builder()
        .backend(ReversingBackend::new())
        .events(tx)
        .build()
        .unwrap();

    let err = translate_document(&BrokenSource, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, PdfTransError::ExtractionFailed { .. }));

    // The caller sees a single error event and never a Done.
    drop(config);
    let mut saw_failed = false;
    while let Some(ev) = rx.recv().await {
        match ev {
            PipelineEvent::Failed(msg) => {
                saw_failed = true;
                assert!(msg.contains("unreadable input"));
            }
            PipelineEvent::Done(_) | PipelineEvent::Progress(_) => {
                panic!("no progress or result expected after a fatal load error")
            }
            PipelineEvent::Status(_) => {}
        }
    }
    assert!(saw_failed);
}

#[tokio::test]
async fn dead_service_degrades_to_original_text() {
    let source = StaticPages::new(vec!["Keep this sentence. And this one.".into()]);
    let config = config_with(Arc::new(DeadBackend));

    let output = translate_document(&source, &config).await.unwrap();

    let page = &output.pages[0];
    assert!(page.translated);
    assert_eq!(page.chunks_total, 2);
    assert_eq!(page.chunks_fallback, 2);
    // Fallback keeps each chunk's original text; the no-separator join still
    // applies, so the inter-sentence space (consumed by the splitter) is gone.
    assert_eq!(page.text, "Keep this sentence.And this one.");
    assert!(!output.stats.is_fully_translated());
}

#[tokio::test]
async fn events_report_progress_in_order_and_end_with_the_document() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = TranslationConfig::builder()
        .backend(ReversingBackend::new())
        .retry_delay_ms(0)
        .throttle_ms(0)
        .events(tx)
        .build()
        .unwrap();

    let source = StaticPages::new(vec![
        "Page one text here.".into(),
        "日本語のページ。".into(),
        "Page three text here.".into(),
    ]);
    let output = translate_document(&source, &config).await.unwrap();
    drop(config);

    let mut progress = Vec::new();
    let mut done = None;
    let mut statuses = Vec::new();
    while let Some(ev) = rx.recv().await {
        match ev {
            PipelineEvent::Progress(p) => progress.push(p),
            PipelineEvent::Done(doc) => done = Some(doc),
            PipelineEvent::Status(s) => statuses.push(s),
            PipelineEvent::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    assert_eq!(progress, vec![33, 66, 100]);
    assert_eq!(done.unwrap(), output.text);
    assert!(statuses.iter().any(|s| s.contains("Total pages: 3")));
    assert!(statuses.iter().any(|s| s.contains("Translating page 1/3")));
    assert!(statuses.iter().any(|s| s.contains("Page 2/3 (pass-through)")));
    assert!(statuses.last().unwrap().contains("Complete"));
}

#[tokio::test]
async fn cancellation_stops_between_pages() {
    let config = config_with(ReversingBackend::new());
    config.cancel_handle().store(true, Ordering::SeqCst);

    let source = StaticPages::new(vec!["Some English text to translate.".into()]);
    let err = translate_document(&source, &config).await.unwrap_err();
    assert!(matches!(
        err,
        PdfTransError::Cancelled {
            completed_pages: 0,
            total_pages: 1
        }
    ));
}

#[tokio::test]
async fn long_sentence_is_chunked_and_reassembles_in_order() {
    // 1100 chars, no terminal marks: one sentence, three chunks.
    let long = "word ".repeat(220);
    let source = StaticPages::new(vec![long.clone()]);

    // An echoing backend makes reassembly byte-exact.
    struct EchoBackend;
    #[async_trait]
    impl TranslationBackend for EchoBackend {
        async fn request(&self, chunk: &str) -> Result<String, RequestError> {
            Ok(chunk.to_string())
        }
    }

    let config = config_with(Arc::new(EchoBackend));
    let output = translate_document(&source, &config).await.unwrap();

    let page = &output.pages[0];
    assert_eq!(page.chunks_total, 3);
    // Chunks are trimmed on submission, so the echoed reassembly differs from
    // the input only at chunk edges; length must never exceed the cap though.
    assert!(page.text.starts_with("word word"));
}

#[tokio::test]
async fn translate_to_file_writes_the_assembled_document() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("bilingual.txt");

    let source = StaticPages::new(vec!["A short English sentence.".into()]);
    let config = config_with(ReversingBackend::new());

    let stats = translate_to_file(&source, &out_path, &config).await.unwrap();
    assert_eq!(stats.total_pages, 1);

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with(&"=".repeat(50)));
    assert!(written.contains(".ecnetnes hsilgnE trohs A"));
    // No leftover temp file from the atomic write.
    assert!(!dir.path().join("bilingual.txt.tmp").exists());
}

#[tokio::test]
async fn blank_page_passes_through_with_its_banner() {
    let source = StaticPages::new(vec!["".into(), "Real English content here.".into()]);
    let config = config_with(ReversingBackend::new());

    let output = translate_document(&source, &config).await.unwrap();

    assert!(!output.pages[0].translated);
    assert_eq!(output.pages[0].text, "");
    assert!(output.text.contains("Page 1"));
    assert!(output.text.contains("Page 2"));
}
