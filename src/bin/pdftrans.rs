//! CLI binary for pdftrans.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `TranslationConfig`, drains the pipeline event channel into a progress
//! bar, and prints or saves the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdftrans::{
    translate_document, LanguagePair, PipelineEvent, TextFileSource, TranslationConfig,
};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Translate extracted text (stdout)
  pdftrans extracted.txt

  # Translate to a file
  pdftrans extracted.txt -o bilingual.txt

  # A different language pair
  pdftrans --source-lang en --target-lang fr report.txt

  # JSON report with per-page statistics
  pdftrans --json extracted.txt > report.json

  # Extract text first, then translate (pdftotext keeps form feeds)
  pdftotext document.pdf - | tee extracted.txt && pdftrans extracted.txt

INPUT FORMAT:
  A UTF-8 plain-text file, one page per form-feed (U+000C) separated block —
  exactly what `pdftotext` emits. A file without form feeds is one page.

TRANSLATION SERVICE:
  The free MyMemory API (https://mymemory.translated.net). No API key is
  required; requests are sent strictly one at a time with a courtesy pause,
  and failed chunks are kept in the original language after 3 attempts.
"#;

/// Translate extracted PDF text page by page into a bilingual document.
#[derive(Parser, Debug)]
#[command(
    name = "pdftrans",
    version,
    about = "Translate extracted PDF text page by page using the MyMemory API",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// UTF-8 text file with form-feed page breaks (e.g. pdftotext output).
    input: PathBuf,

    /// Write the bilingual document to this file instead of stdout.
    #[arg(short, long, env = "PDFTRANS_OUTPUT")]
    output: Option<PathBuf>,

    /// Source language code (pages in any other language pass through).
    #[arg(long, env = "PDFTRANS_SOURCE_LANG", default_value = "en")]
    source_lang: String,

    /// Target language code.
    #[arg(long, env = "PDFTRANS_TARGET_LANG", default_value = "ja")]
    target_lang: String,

    /// Translation service endpoint.
    #[arg(
        long,
        env = "PDFTRANS_ENDPOINT",
        default_value = "https://api.mymemory.translated.net/get"
    )]
    endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PDFTRANS_TIMEOUT", default_value_t = 15)]
    timeout: u64,

    /// Request attempts per chunk before keeping the original text.
    #[arg(long, env = "PDFTRANS_ATTEMPTS", default_value_t = 3)]
    attempts: u32,

    /// Print a JSON report (document + per-page stats) instead of plain text.
    #[arg(long)]
    json: bool,

    /// Suppress the progress bar and status lines.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = TranslationConfig::builder()
        .languages(LanguagePair::new(&cli.source_lang, &cli.target_lang))
        .endpoint(&cli.endpoint)
        .api_timeout_secs(cli.timeout)
        .max_attempts(cli.attempts)
        .events(tx)
        .build()
        .context("invalid configuration")?;

    // Ctrl-C stops the pipeline at the next page/chunk boundary.
    let cancel = config.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{}", red("Cancelling after the current chunk..."));
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let bar = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}%  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Translating");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };

    let source = TextFileSource::new(&cli.input);
    let pipeline = {
        let config = config.clone();
        tokio::spawn(async move { translate_document(&source, &config).await })
    };
    // Only the pipeline task may keep a sender alive, so the event loop
    // terminates even if the task dies without a final event.
    drop(config);

    while let Some(event) = rx.recv().await {
        match event {
            PipelineEvent::Progress(pct) => bar.set_position(u64::from(pct)),
            PipelineEvent::Status(line) => {
                if !cli.quiet {
                    bar.println(format!("  {}", dim(&line)));
                }
                bar.set_message(line);
            }
            PipelineEvent::Done(_) | PipelineEvent::Failed(_) => break,
        }
    }
    bar.finish_and_clear();

    let output = pipeline
        .await
        .context("pipeline task panicked")?
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&output).context("serialising JSON report")?
    } else {
        output.text.clone()
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, &rendered)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} {} pages → {}",
                green("✔"),
                bold(&output.stats.total_pages.to_string()),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    if output.stats.chunks_fallback > 0 {
        eprintln!(
            "{} {} of {} chunks kept their original text (service unavailable)",
            red("⚠"),
            output.stats.chunks_fallback,
            output.stats.chunks_total
        );
    }

    Ok(())
}
