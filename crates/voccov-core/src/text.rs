//! Text tokenization.
//!
//! Text is split on maximal runs of ASCII letters and hyphens that sit on
//! word boundaries. The pieces between matches are kept as [`Fragment::Gap`]
//! so callers can see the full partition of the input, but only
//! [`Fragment::Word`] pieces are ever candidate vocabulary.

use regex::Regex;
use std::sync::LazyLock;

/// Letter/hyphen runs bounded by word boundaries.
///
/// `\b` is Unicode-aware, so a run glued to a digit, underscore or accented
/// letter ("abc1", "café") is not a word.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z-]+)\b").expect("valid regex"));

/// One piece of tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// A letter/hyphen run.
    Word(&'a str),
    /// Text between two words (punctuation, digits, whitespace, ...).
    Gap(&'a str),
}

/// Split text into alternating gap and word fragments.
///
/// Like a capturing split: the result starts and ends with a gap (possibly
/// empty), and concatenating all fragments reproduces the input.
pub fn split_fragments(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for found in WORD_PATTERN.find_iter(text) {
        fragments.push(Fragment::Gap(&text[last..found.start()]));
        fragments.push(Fragment::Word(found.as_str()));
        last = found.end();
    }
    fragments.push(Fragment::Gap(&text[last..]));

    fragments
}

/// Candidate words of `text`, in order, with every gap discarded.
pub fn candidate_words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|found| found.as_str())
}
