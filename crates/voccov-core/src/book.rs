//! Per-text headword statistics and coverage queries.

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{BookError, BookResult};
use crate::finder::WordFinder;
use crate::reference::ReferenceData;
use crate::text;

/// Frequency rank and occurrence count of one headword in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WordStat {
    /// One-based rank in the frequency list; 0 when unlisted.
    pub rank: usize,
    /// Occurrences of the headword (any inflection) in the text.
    pub occurrences: usize,
}

/// Headword statistics for one input text.
///
/// Built once and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Book {
    words: IndexMap<String, WordStat>,
    total: usize,
}

impl Book {
    /// Tokenize, filter, lemmatize and count `text`.
    ///
    /// Words are lowercased, tokens outside the reference vocabulary are
    /// dropped, and each survivor is credited to its headword. Headwords are
    /// kept in order of first occurrence.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn from_text(text: &str, reference: &ReferenceData, finder: &WordFinder) -> Self {
        let content = text.to_lowercase();
        let mut words: IndexMap<String, WordStat> = IndexMap::new();
        let mut total = 0;

        for token in text::candidate_words(&content).filter(|word| reference.is_valid(word)) {
            let headword = match finder.find_headword(token) {
                Ok(headword) => headword,
                Err(err) => {
                    tracing::warn!(error = %err, "valid word has no headword, skipping");
                    continue;
                }
            };

            let stat = words
                .entry(headword.to_string())
                .or_insert_with(|| WordStat {
                    rank: reference.rank(headword),
                    occurrences: 0,
                });
            stat.occurrences += 1;
            total += 1;
        }

        tracing::debug!(total, distinct = words.len(), "book counted");
        Self { words, total }
    }

    /// Read a text file and build its statistics.
    ///
    /// When `max_bytes` is set, files larger than the limit are rejected
    /// before they are read.
    #[tracing::instrument(skip_all, fields(path = %path, max_bytes = ?max_bytes))]
    pub fn open(
        path: &Utf8Path,
        max_bytes: Option<usize>,
        reference: &ReferenceData,
        finder: &WordFinder,
    ) -> BookResult<Self> {
        let read_error = |source| BookError::Read {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path.as_std_path()).map_err(read_error)?;
        if let Some(limit) = max_bytes
            && metadata.len() > limit as u64
        {
            return Err(BookError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }

        let content = std::fs::read_to_string(path.as_std_path()).map_err(read_error)?;
        Ok(Self::from_text(&content, reference, finder))
    }

    /// Percentage of word occurrences whose headword rank is at most
    /// `threshold`.
    ///
    /// Unlisted headwords carry rank 0 and are therefore always counted as
    /// covered. An empty book has 0.0 coverage.
    pub fn coverage(&self, threshold: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let covered: usize = self
            .words
            .values()
            .filter(|stat| stat.rank <= threshold)
            .map(|stat| stat.occurrences)
            .sum();
        covered as f64 * 100.0 / self.total as f64
    }

    /// Total word occurrences after lemmatization.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct headwords.
    pub fn distinct(&self) -> usize {
        self.words.len()
    }

    /// Whether the text contained no recognized words.
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Headword statistics in order of first occurrence.
    pub const fn words(&self) -> &IndexMap<String, WordStat> {
        &self.words
    }

    /// Statistics for one headword.
    pub fn stat(&self, headword: &str) -> Option<WordStat> {
        self.words.get(headword).copied()
    }
}
