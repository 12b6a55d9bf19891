//! Headword lookup for inflected word forms.
//!
//! [`WordFinder`] partitions the lemma table into 26 buckets keyed by the
//! headword's first letter, plus a special table for headwords that have at
//! least one inflection starting with a different letter ("bad" → "worse").
//! A token is resolved by checking its own letter bucket first and falling
//! back to the special table.
//!
//! ```text
//! main_table['a'] = { "abandon": {"abandons", "abandoned", "abandoning"},
//!                     "abeam":   None, ... }
//! special_table   = { "bad": {"badder", "baddest", "worse", "worst"}, ... }
//! ```

use indexmap::IndexMap;

use crate::error::{LookupError, LookupResult};
use crate::reference::{Inflections, LemmaTable};

const LETTERS: usize = 26;

/// Where a headword lives inside a [`WordFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// In the bucket for this lowercase ASCII letter.
    Main(char),
    /// In the special table.
    Special,
}

impl Placement {
    /// Decide where a headword belongs.
    ///
    /// Headwords that do not start with an ASCII letter have no bucket and
    /// go to the special table.
    pub fn of(headword: &str, inflections: Option<&Inflections>) -> Self {
        let Some(first) = headword.chars().next().filter(char::is_ascii_lowercase) else {
            return Self::Special;
        };

        let diverges = inflections.is_some_and(|set| {
            set.iter()
                .any(|inflection| inflection.chars().next() != Some(first))
        });
        if diverges { Self::Special } else { Self::Main(first) }
    }
}

type Bucket = IndexMap<String, Option<Inflections>>;

/// Lemma lookup structure built once from a [`LemmaTable`].
#[derive(Debug, Clone)]
pub struct WordFinder {
    main_table: [Bucket; LETTERS],
    special_table: IndexMap<String, Inflections>,
}

impl WordFinder {
    /// Partition the lemma table into letter buckets and the special table.
    #[tracing::instrument(skip_all, fields(headwords = lemmas.len()))]
    pub fn new(lemmas: &LemmaTable) -> Self {
        let mut main_table: [Bucket; LETTERS] = std::array::from_fn(|_| Bucket::new());
        let mut special_table = IndexMap::new();

        for (headword, inflections) in lemmas.iter() {
            match (Placement::of(headword, inflections), inflections) {
                (Placement::Main(letter), inflections) => {
                    main_table[bucket_index(letter)]
                        .insert(headword.to_string(), inflections.cloned());
                }
                (Placement::Special, Some(inflections)) => {
                    special_table.insert(headword.to_string(), inflections.clone());
                }
                (Placement::Special, None) => {
                    special_table.insert(headword.to_string(), Inflections::new());
                }
            }
        }

        let finder = Self {
            main_table,
            special_table,
        };
        tracing::debug!(
            main = finder.len() - finder.special_len(),
            special = finder.special_len(),
            "word finder built"
        );
        finder
    }

    /// Resolve a word to its headword.
    ///
    /// The word is lowercased first. Its own letter bucket is tried as an
    /// exact headword, then by inflection membership in bucket order; the
    /// special table is scanned last. Words outside the lemma table yield
    /// [`LookupError::UnknownWord`].
    pub fn find_headword(&self, word: &str) -> LookupResult<&str> {
        let word = word.to_lowercase();

        if let Some(bucket) = word
            .chars()
            .next()
            .filter(char::is_ascii_lowercase)
            .map(|letter| &self.main_table[bucket_index(letter)])
        {
            if let Some((headword, _)) = bucket.get_key_value(&word) {
                return Ok(headword.as_str());
            }
            let owner = bucket
                .iter()
                .find(|(_, inflections)| matches!(inflections, Some(set) if set.contains(&word)));
            if let Some((headword, _)) = owner {
                return Ok(headword.as_str());
            }
        }

        self.special_table
            .iter()
            .find(|(headword, inflections)| **headword == word || inflections.contains(&word))
            .map(|(headword, _)| headword.as_str())
            .ok_or(LookupError::UnknownWord(word))
    }

    /// Inflections recorded for a headword, if it has any.
    pub fn find_related(&self, headword: &str) -> Option<&Inflections> {
        let headword = headword.to_lowercase();
        if let Some(inflections) = self.special_table.get(&headword) {
            return Some(inflections).filter(|set| !set.is_empty());
        }
        let letter = headword.chars().next().filter(char::is_ascii_lowercase)?;
        self.main_table[bucket_index(letter)]
            .get(&headword)
            .and_then(Option::as_ref)
    }

    /// Where `headword` was placed, or `None` if it is not a headword.
    pub fn placement(&self, headword: &str) -> Option<Placement> {
        if self.special_table.contains_key(headword) {
            return Some(Placement::Special);
        }
        let letter = headword.chars().next().filter(char::is_ascii_lowercase)?;
        self.main_table[bucket_index(letter)]
            .contains_key(headword)
            .then_some(Placement::Main(letter))
    }

    /// Total number of headwords.
    pub fn len(&self) -> usize {
        self.main_table.iter().map(IndexMap::len).sum::<usize>() + self.special_table.len()
    }

    /// Whether no headwords were loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of headwords in the special table.
    pub fn special_len(&self) -> usize {
        self.special_table.len()
    }
}

const fn bucket_index(letter: char) -> usize {
    (letter as u8 - b'a') as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEMMAS: &str = "\
abandon\tabandons abandoned abandoning
abeam
apply\tapplies applied applying
bad\tbadder baddest badly badness worse worst
although\taltho tho though
run\trunning runs ran
";

    fn finder() -> (LemmaTable, WordFinder) {
        let table = LemmaTable::parse(LEMMAS).unwrap();
        let finder = WordFinder::new(&table);
        (table, finder)
    }

    #[test]
    fn every_inflection_resolves_to_its_headword() {
        let (table, finder) = finder();
        for (headword, inflections) in table.iter() {
            for inflection in inflections.into_iter().flatten() {
                assert_eq!(
                    finder.find_headword(inflection),
                    Ok(headword),
                    "inflection {inflection}"
                );
            }
        }
    }

    #[test]
    fn every_headword_resolves_to_itself() {
        let (table, finder) = finder();
        for (headword, _) in table.iter() {
            assert_eq!(finder.find_headword(headword), Ok(headword));
        }
    }

    #[test]
    fn lookup_lowercases_input() {
        let (_, finder) = finder();
        assert_eq!(finder.find_headword("Abandoned"), Ok("abandon"));
        assert_eq!(finder.find_headword("WORSE"), Ok("bad"));
    }

    #[test]
    fn unknown_word_is_a_typed_error() {
        let (_, finder) = finder();
        assert_eq!(
            finder.find_headword("zebra"),
            Err(LookupError::UnknownWord("zebra".to_string()))
        );
    }

    #[test]
    fn non_letter_word_falls_through_to_special_table() {
        let (_, finder) = finder();
        assert!(finder.find_headword("-").is_err());
        assert!(finder.find_headword("").is_err());
    }

    #[test]
    fn divergent_inflections_go_to_special_table() {
        let (_, finder) = finder();
        assert_eq!(finder.placement("bad"), Some(Placement::Special));
        assert_eq!(finder.placement("although"), Some(Placement::Special));
        assert_eq!(finder.placement("abandon"), Some(Placement::Main('a')));
        assert_eq!(finder.placement("abeam"), Some(Placement::Main('a')));
        assert_eq!(finder.placement("worse"), None);
    }

    #[test]
    fn each_headword_has_exactly_one_placement() {
        let (table, finder) = finder();
        assert_eq!(finder.len(), table.len());
        assert_eq!(finder.special_len(), 2);
        for (headword, _) in table.iter() {
            assert!(finder.placement(headword).is_some(), "{headword} unplaced");
        }
    }

    #[test]
    fn headword_without_letter_bucket_is_special() {
        let table = LemmaTable::parse("'em\n").unwrap();
        let finder = WordFinder::new(&table);
        assert_eq!(finder.placement("'em"), Some(Placement::Special));
        assert_eq!(finder.find_headword("'em"), Ok("'em"));
        assert!(finder.find_related("'em").is_none());
    }

    #[test]
    fn first_matching_headword_in_bucket_order_wins() {
        let table = LemmaTable::parse("left\tlefts\nleave\tleaves left\n").unwrap();
        let finder = WordFinder::new(&table);
        // "left" is itself a headword, so the exact match takes priority.
        assert_eq!(finder.find_headword("left"), Ok("left"));

        let table = LemmaTable::parse("lie\tlay lain\nlay\tlays laid\nlaid\n").unwrap();
        let finder = WordFinder::new(&table);
        assert_eq!(finder.find_headword("lain"), Ok("lie"));
    }

    #[test]
    fn find_related_returns_inflections() {
        let (_, finder) = finder();
        let related = finder.find_related("run").unwrap();
        assert!(related.contains("ran"));
        assert!(finder.find_related("bad").unwrap().contains("worst"));
        assert!(finder.find_related("abeam").is_none());
        assert!(finder.find_related("zebra").is_none());
    }
}
