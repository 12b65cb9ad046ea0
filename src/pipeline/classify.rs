//! Language classification: route a page to translation or pass-through.
//!
//! Extracted PDF text carries no language metadata, so routing relies on a
//! cheap heuristic: source-language (English) pages are overwhelmingly ASCII,
//! target-language (Japanese) pages are overwhelmingly not. Counting code
//! points below 128 against the trimmed length separates the two reliably for
//! the single fixed language pair this pipeline supports — no dictionary or
//! n-gram model needed.

/// Decide whether a text block is in the source language.
///
/// `ascii_count` is counted over the whole block, `total_count` over the
/// whitespace-trimmed block; the ratio is compared **strictly** against
/// `threshold`, so a block at exactly the threshold is treated as target
/// language. An empty (or whitespace-only) block is never source language,
/// which keeps blank pages out of the translation path.
///
/// Pure function, no side effects.
pub fn is_source_language(text: &str, threshold: f64) -> bool {
    let total_count = text.trim().chars().count();
    if total_count == 0 {
        return false;
    }
    let ascii_count = text.chars().filter(|c| (*c as u32) < 128).count();
    ascii_count as f64 / total_count as f64 > threshold
}
