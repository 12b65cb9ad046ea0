//! Sentence segmentation and chunking for the translation service.
//!
//! The service caps request size, so a reconstructed paragraph is split twice:
//! first into sentences at "terminal mark followed by whitespace" boundaries,
//! then any oversized sentence into fixed-size runs of at most
//! `max_chars` Unicode scalar values. Chunk boundaries never drop characters:
//! concatenating a sentence's chunks in order reproduces the sentence exactly.

/// Sentence-terminal marks that end a sentence when followed by whitespace.
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Split a paragraph into sentences.
///
/// A boundary is a terminal mark (`.` `!` `?`) immediately followed by
/// whitespace; the mark stays with the left sentence and the whitespace run
/// is consumed. Whitespace-only results are discarded, so an empty paragraph
/// yields an empty vector. Text with no terminal mark is one sentence.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = paragraph.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if TERMINALS.contains(&c) && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            if !current.trim().is_empty() {
                sentences.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }

    if !current.trim().is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Cut a sentence into chunks of at most `max_chars` Unicode scalar values.
///
/// Sentences within the limit come back as a single chunk. Longer sentences
/// are cut into fixed runs of `max_chars` (the last run may be shorter);
/// the cut is positional, not linguistic, because the alternative — refusing
/// the sentence — would lose content entirely.
pub fn chunk_sentence(sentence: &str, max_chars: usize) -> Vec<String> {
    debug_assert!(max_chars > 0);
    if sentence.chars().count() <= max_chars {
        return vec![sentence.to_string()];
    }
    sentence
        .chars()
        .collect::<Vec<char>>()
        .chunks(max_chars)
        .map(|run| run.iter().collect())
        .collect()
}
