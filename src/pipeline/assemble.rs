//! Result assembly: banner each page and join into one document.
//!
//! The only externally visible output of the pipeline is a single string.
//! Each page's output is prefixed with a banner block — a delimiter line,
//! a `Page N` label, a delimiter line — so a reader of the bilingual
//! document can always tell where a source page began, including for pages
//! that passed through untranslated.

use crate::output::PageReport;

const DELIMITER_WIDTH: usize = 50;

/// Render the banner block for a 1-based page number.
pub fn page_banner(page_num: usize) -> String {
    let rule = "=".repeat(DELIMITER_WIDTH);
    format!("{rule}\nPage {page_num}\n{rule}")
}

/// Concatenate page outputs, in order, into the final document.
///
/// Pages arrive already ordered by the strictly sequential pipeline; this
/// function never reorders them.
pub fn assemble_document(pages: &[PageReport]) -> String {
    let blocks: Vec<String> = pages
        .iter()
        .map(|page| format!("{}\n{}", page_banner(page.page_num), page.text))
        .collect();
    blocks.join("\n")
}
