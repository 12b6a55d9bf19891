//! Reference data: the frequency-ranked word list and the lemma table.
//!
//! Both files are read once at startup into a [`ReferenceData`] value that
//! is then shared by reference with [`WordFinder`](crate::finder::WordFinder)
//! and [`Book`](crate::book::Book).
//!
//! # File formats
//!
//! - Frequency list: one word per line, most frequent first. A word's rank
//!   is its zero-based line index plus one.
//! - Lemma table: one entry per line, `headword<TAB>inflection inflection ...`.
//!   The inflection field is optional.
//!
//! All words are lowercased on load.

use std::collections::{HashMap, HashSet};

use camino::Utf8Path;
use indexmap::{IndexMap, IndexSet};

use crate::error::{ReferenceError, ReferenceResult};

/// Default frequency list file name, resolved against the working directory.
pub const DEFAULT_FREQUENCY_LIST: &str = "COCA60000.txt";

/// Default lemma table file name, resolved against the working directory.
pub const DEFAULT_LEMMA_FILE: &str = "lemmas.txt";

/// Inflections of one headword, in file order. Never empty when stored.
pub type Inflections = IndexSet<String>;

/// Frequency-ranked word list with constant-time rank lookup.
#[derive(Debug, Clone, Default)]
pub struct RankList {
    words: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl RankList {
    /// Parse a frequency list, one word per line.
    ///
    /// Blank lines keep their slot in the ranking but are never ranked
    /// themselves. When a word appears twice, the first line wins.
    pub fn parse(source: &str) -> ReferenceResult<Self> {
        let mut words = Vec::new();
        let mut ranks = HashMap::new();

        for (index, line) in source.lines().enumerate() {
            let word = line.trim().to_lowercase();
            if !word.is_empty() {
                ranks.entry(word.clone()).or_insert(index + 1);
            }
            words.push(word);
        }

        if ranks.is_empty() {
            return Err(ReferenceError::EmptyFrequencyList);
        }

        Ok(Self { words, ranks })
    }

    /// One-based rank of `word`, or 0 when it is not in the list.
    pub fn rank(&self, word: &str) -> usize {
        self.ranks.get(word).copied().unwrap_or(0)
    }

    /// Number of lines in the list, blank lines included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list has no lines.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct ranked words.
    pub fn ranked_words(&self) -> usize {
        self.ranks.len()
    }
}

/// Headword → optional inflection set, in file order.
#[derive(Debug, Clone, Default)]
pub struct LemmaTable {
    entries: IndexMap<String, Option<Inflections>>,
}

impl LemmaTable {
    /// Parse a tab-separated lemma table.
    ///
    /// Lines are trimmed before splitting, blank lines are skipped, and an
    /// inflection field holding only whitespace counts as absent. A repeated
    /// headword keeps its first position but takes the later inflections.
    pub fn parse(source: &str) -> ReferenceResult<Self> {
        let mut entries = IndexMap::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let headword = fields.next().unwrap_or_default().to_lowercase();
            let inflections: Option<Inflections> = fields
                .next()
                .map(|related| {
                    related
                        .split_whitespace()
                        .map(str::to_lowercase)
                        .collect::<Inflections>()
                })
                .filter(|set| !set.is_empty());

            entries.insert(headword, inflections);
        }

        if entries.is_empty() {
            return Err(ReferenceError::EmptyLemmaTable);
        }

        Ok(Self { entries })
    }

    /// Iterate over `(headword, inflections)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Inflections>)> {
        self.entries
            .iter()
            .map(|(headword, inflections)| (headword.as_str(), inflections.as_ref()))
    }

    /// Inflections recorded for `headword`; `None` if unknown or bare.
    pub fn get(&self, headword: &str) -> Option<&Inflections> {
        self.entries.get(headword).and_then(Option::as_ref)
    }

    /// Number of headwords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no headwords.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything loaded at startup: ranks, lemmas, and the set of valid words.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    ranks: RankList,
    lemmas: LemmaTable,
    valid_words: HashSet<String>,
}

impl ReferenceData {
    /// Combine a rank list and a lemma table, deriving `valid_words`.
    pub fn new(ranks: RankList, lemmas: LemmaTable) -> Self {
        let mut valid_words = HashSet::new();
        for (headword, inflections) in lemmas.iter() {
            valid_words.insert(headword.to_string());
            if let Some(inflections) = inflections {
                valid_words.extend(inflections.iter().cloned());
            }
        }

        Self {
            ranks,
            lemmas,
            valid_words,
        }
    }

    /// Build reference data from in-memory file contents.
    pub fn from_sources(frequency_list: &str, lemma_table: &str) -> ReferenceResult<Self> {
        Ok(Self::new(
            RankList::parse(frequency_list)?,
            LemmaTable::parse(lemma_table)?,
        ))
    }

    /// Read and parse both reference files.
    #[tracing::instrument(skip_all, fields(frequency_list = %frequency_list, lemma_table = %lemma_table))]
    pub fn load(frequency_list: &Utf8Path, lemma_table: &Utf8Path) -> ReferenceResult<Self> {
        let frequency_source = read_reference(frequency_list)?;
        let lemma_source = read_reference(lemma_table)?;
        let data = Self::from_sources(&frequency_source, &lemma_source)?;

        tracing::debug!(
            ranked = data.ranks.ranked_words(),
            headwords = data.lemmas.len(),
            valid_words = data.valid_words.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    /// Whether `word` is a known headword or inflection.
    pub fn is_valid(&self, word: &str) -> bool {
        self.valid_words.contains(word)
    }

    /// One-based frequency rank of `word`, or 0 if unlisted.
    pub fn rank(&self, word: &str) -> usize {
        self.ranks.rank(word)
    }

    /// The frequency list.
    pub const fn ranks(&self) -> &RankList {
        &self.ranks
    }

    /// The lemma table.
    pub const fn lemmas(&self) -> &LemmaTable {
        &self.lemmas
    }

    /// Number of distinct valid words.
    pub fn valid_word_count(&self) -> usize {
        self.valid_words.len()
    }
}

fn read_reference(path: &Utf8Path) -> ReferenceResult<String> {
    std::fs::read_to_string(path.as_std_path()).map_err(|source| ReferenceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rank_is_line_index_plus_one() {
        let ranks = RankList::parse("the\nbe\nand\nof\na\nrun\n").unwrap();
        assert_eq!(ranks.rank("the"), 1);
        assert_eq!(ranks.rank("run"), 6);
        assert_eq!(ranks.rank("zebra"), 0);
        assert_eq!(ranks.len(), 6);
    }

    #[test]
    fn first_occurrence_wins_for_duplicate_ranks() {
        let ranks = RankList::parse("the\nrun\nthe\n").unwrap();
        assert_eq!(ranks.rank("the"), 1);
        assert_eq!(ranks.ranked_words(), 2);
    }

    #[test]
    fn blank_lines_keep_their_slot() {
        let ranks = RankList::parse("the\n\nrun\n").unwrap();
        assert_eq!(ranks.rank("run"), 3);
        assert_eq!(ranks.rank(""), 0);
    }

    #[test]
    fn empty_frequency_list_is_an_error() {
        assert!(matches!(
            RankList::parse("\n\n"),
            Err(ReferenceError::EmptyFrequencyList)
        ));
    }

    #[test]
    fn lemma_line_without_inflections() {
        let table = LemmaTable::parse("abeam\n").unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("abeam").is_none());
        assert_eq!(table.iter().next(), Some(("abeam", None)));
    }

    #[test]
    fn lemma_line_with_inflections_is_lowercased() {
        let table = LemmaTable::parse("Run\tRunning runs RAN\n").unwrap();
        let inflections = table.get("run").unwrap();
        let collected: Vec<&str> = inflections.iter().map(String::as_str).collect();
        assert_eq!(collected, vec!["running", "runs", "ran"]);
    }

    #[test]
    fn whitespace_only_inflection_field_is_absent() {
        let table = LemmaTable::parse("abeam\t  \n").unwrap();
        assert!(table.get("abeam").is_none());
    }

    #[test]
    fn repeated_headword_takes_later_inflections() {
        let table = LemmaTable::parse("run\trunning\nwalk\nrun\truns ran\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().map(|(h, _)| h), Some("run"));
        assert!(table.get("run").unwrap().contains("ran"));
        assert!(!table.get("run").unwrap().contains("running"));
    }

    #[test]
    fn empty_lemma_table_is_an_error() {
        assert!(matches!(
            LemmaTable::parse("   \n"),
            Err(ReferenceError::EmptyLemmaTable)
        ));
    }

    #[test]
    fn valid_words_cover_headwords_and_inflections() {
        let data = ReferenceData::from_sources("run\n", "run\trunning ran\nabeam\n").unwrap();
        assert!(data.is_valid("run"));
        assert!(data.is_valid("running"));
        assert!(data.is_valid("ran"));
        assert!(data.is_valid("abeam"));
        assert!(!data.is_valid("walk"));
        assert_eq!(data.valid_word_count(), 4);
    }

    #[test]
    fn load_reads_both_files() {
        let tmp = TempDir::new().unwrap();
        let freq = tmp.path().join("freq.txt");
        let lemmas = tmp.path().join("lemmas.txt");
        fs::write(&freq, "the\nrun\n").unwrap();
        fs::write(&lemmas, "run\truns\n").unwrap();

        let freq = Utf8PathBuf::try_from(freq).unwrap();
        let lemmas = Utf8PathBuf::try_from(lemmas).unwrap();
        let data = ReferenceData::load(&freq, &lemmas).unwrap();
        assert_eq!(data.rank("run"), 2);
        assert!(data.is_valid("runs"));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let missing = Utf8PathBuf::try_from(tmp.path().join("nope.txt")).unwrap();
        let err = ReferenceData::load(&missing, &missing).unwrap_err();
        assert!(matches!(err, ReferenceError::Read { ref path, .. } if path == &missing));
    }
}
