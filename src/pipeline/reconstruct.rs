//! Paragraph reconstruction: repair line-wrapped PDF text.
//!
//! Text extractors emit one line per visual line, so a sentence wrapped over
//! four lines arrives as four fragments, sometimes with a word split by a
//! trailing hyphen. Translating fragments independently destroys meaning, so
//! before segmentation the page is rebuilt into logical paragraphs:
//!
//! 1. A hyphen immediately before a line break is a printer's word split —
//!    delete both and rejoin the word halves.
//! 2. A blank line is a paragraph boundary and is preserved as one.
//! 3. A line following a fragment that does not end in `.` `!` `?` `:` is a
//!    continuation of the same sentence and is joined with a single space.
//!
//! This is a best-effort heuristic: it guarantees consistent rejoining of
//! split lines, not grammatically perfect paragraphs.

use once_cell::sync::Lazy;
use regex::Regex;

/// A fragment ending in a sentence-terminal mark, with optional trailing
/// whitespace, is treated as complete; anything else continues on the next line.
static RE_TERMINAL_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?:]\s*$").unwrap());

/// Rebuild logical paragraphs from raw extracted page text.
///
/// Returns newline-joined blocks; blank source lines survive as empty lines
/// so downstream spacing is preserved.
pub fn reconstruct_paragraphs(raw: &str) -> String {
    // Rejoin words hyphenated across a line break before any line handling.
    let dehyphenated = raw.replace("-\n", "");

    let mut blocks: Vec<String> = Vec::new();
    let mut accumulator: Vec<String> = Vec::new();

    for line in dehyphenated.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !accumulator.is_empty() {
                blocks.push(accumulator.join(" "));
                accumulator.clear();
            }
            blocks.push(String::new());
        } else if accumulator.last().is_some_and(|prev| !ends_with_terminal(prev)) {
            // Mid-sentence wrap: continue the current fragment.
            accumulator.push(line.to_string());
        } else {
            if !accumulator.is_empty() {
                blocks.push(accumulator.join(" "));
                accumulator.clear();
            }
            accumulator.push(line.to_string());
        }
    }

    if !accumulator.is_empty() {
        blocks.push(accumulator.join(" "));
    }

    blocks.join("\n")
}

fn ends_with_terminal(fragment: &str) -> bool {
    RE_TERMINAL_END.is_match(fragment)
}
