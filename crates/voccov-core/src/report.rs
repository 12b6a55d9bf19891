//! Coverage summaries and the per-headword table.
//!
//! Everything here is presentation over a finished [`Book`]: the threshold
//! ladder, the sortable headword rows, and the fixed-width text table that
//! is written to the report file.

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Thresholds reported by default: 4k–19k by 1k, 20k–40k by 5k, then 50k
/// and 60k.
pub const DEFAULT_THRESHOLDS: [usize; 23] = [
    4_000, 5_000, 6_000, 7_000, 8_000, 9_000, 10_000, 11_000, 12_000, 13_000, 14_000, 15_000,
    16_000, 17_000, 18_000, 19_000, 20_000, 25_000, 30_000, 35_000, 40_000, 50_000, 60_000,
];

/// Column the headword table is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortKey {
    /// Frequency-list rank.
    #[default]
    Coca,
    /// Occurrences in the text.
    Occ,
}

impl SortKey {
    /// Returns the sort key as it is spelled on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coca => "coca",
            Self::Occ => "occ",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoveragePoint {
    /// Rank threshold.
    pub threshold: usize,
    /// Percentage of occurrences covered (0–100).
    pub coverage: f64,
}

impl std::fmt::Display for CoveragePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<5} vocabulary coverage:{:>6.2}%",
            self.threshold, self.coverage
        )
    }
}

/// One line of the headword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadwordRow {
    /// The headword.
    pub word: String,
    /// Frequency-list rank, 0 when unlisted.
    pub rank: usize,
    /// Occurrences in the text.
    pub occurrences: usize,
}

/// Everything the `coverage` command reports for one text.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Total word occurrences.
    pub total: usize,
    /// Distinct headwords.
    pub distinct: usize,
    /// Coverage at each requested threshold.
    pub points: Vec<CoveragePoint>,
    /// Headword table rows in the requested order.
    pub words: Vec<HeadwordRow>,
}

impl CoverageReport {
    /// Build the full report for a book.
    #[tracing::instrument(skip(book), fields(total = book.total()))]
    pub fn build(book: &Book, thresholds: &[usize], sort: SortKey, reverse: bool) -> Self {
        Self {
            total: book.total(),
            distinct: book.distinct(),
            points: coverage_ladder(book, thresholds),
            words: headword_rows(book, sort, reverse),
        }
    }
}

/// Coverage of `book` at each threshold, in the given order.
pub fn coverage_ladder(book: &Book, thresholds: &[usize]) -> Vec<CoveragePoint> {
    thresholds
        .iter()
        .map(|&threshold| CoveragePoint {
            threshold,
            coverage: book.coverage(threshold),
        })
        .collect()
}

/// Headword rows sorted by `key`.
///
/// The sort is stable in both directions: rows with equal keys keep their
/// first-occurrence order even when `reverse` is set.
pub fn headword_rows(book: &Book, key: SortKey, reverse: bool) -> Vec<HeadwordRow> {
    let mut rows: Vec<HeadwordRow> = book
        .words()
        .iter()
        .map(|(word, stat)| HeadwordRow {
            word: word.clone(),
            rank: stat.rank,
            occurrences: stat.occurrences,
        })
        .collect();

    let sort_value = |row: &HeadwordRow| match key {
        SortKey::Coca => row.rank,
        SortKey::Occ => row.occurrences,
    };
    if reverse {
        rows.sort_by(|a, b| sort_value(b).cmp(&sort_value(a)));
    } else {
        rows.sort_by_key(sort_value);
    }
    rows
}

/// Render rows as the fixed-width `WORD COCA OCC` table.
///
/// The word column is as wide as the longest headword; lines are joined
/// with `line_sep` and the table ends with one.
pub fn render_table(rows: &[HeadwordRow], line_sep: &str) -> String {
    let width = rows
        .iter()
        .map(|row| row.word.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{:<width$} {:<5} {:<5}", "WORD", "COCA", "OCC"));
    lines.push(format!("{:<width$} {:<5} {:<5}", "----", "----", "---"));
    for row in rows {
        lines.push(format!(
            "{:<width$} {:<5} {:<5}",
            row.word, row.rank, row.occurrences
        ));
    }

    let mut table = lines.join(line_sep);
    table.push_str(line_sep);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::WordFinder;
    use crate::reference::ReferenceData;

    fn book(text: &str) -> Book {
        let reference = ReferenceData::from_sources(
            "the\nbe\nand\nof\na\nrun\nwhile\n",
            "run\trunning runs ran\nwhile\nbe\tis are was\nzebra\n",
        )
        .unwrap();
        let finder = WordFinder::new(reference.lemmas());
        Book::from_text(text, &reference, &finder)
    }

    #[test]
    fn default_ladder_shape() {
        assert_eq!(DEFAULT_THRESHOLDS.first(), Some(&4_000));
        assert_eq!(DEFAULT_THRESHOLDS[15], 19_000);
        assert_eq!(DEFAULT_THRESHOLDS[16], 20_000);
        assert_eq!(DEFAULT_THRESHOLDS[20], 40_000);
        assert_eq!(DEFAULT_THRESHOLDS.last(), Some(&60_000));
        assert!(DEFAULT_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ladder_follows_threshold_order() {
        let book = book("ran while is");
        let points = coverage_ladder(&book, &[7, 2, 6]);
        let thresholds: Vec<usize> = points.iter().map(|p| p.threshold).collect();
        assert_eq!(thresholds, vec![7, 2, 6]);
        assert!((points[0].coverage - 100.0).abs() < 1e-9);
        assert!((points[1].coverage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn point_display_matches_summary_format() {
        let point = CoveragePoint {
            threshold: 4_000,
            coverage: 93.456,
        };
        assert_eq!(point.to_string(), "4000  vocabulary coverage: 93.46%");

        let point = CoveragePoint {
            threshold: 60_000,
            coverage: 100.0,
        };
        assert_eq!(point.to_string(), "60000 vocabulary coverage:100.00%");
    }

    #[test]
    fn rows_sort_by_rank() {
        let book = book("while ran zebra is");
        let rows = headword_rows(&book, SortKey::Coca, false);
        let words: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["zebra", "be", "run", "while"]);
    }

    #[test]
    fn rows_sort_by_occurrences_reversed() {
        let book = book("zebra ran running runs is was");
        let rows = headword_rows(&book, SortKey::Occ, true);
        let words: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["run", "be", "zebra"]);
    }

    #[test]
    fn reverse_keeps_ties_in_first_occurrence_order() {
        let book = book("while zebra ran");
        let rows = headword_rows(&book, SortKey::Occ, true);
        let words: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["while", "zebra", "run"]);
    }

    #[test]
    fn table_layout() {
        let rows = vec![
            HeadwordRow {
                word: "run".to_string(),
                rank: 6,
                occurrences: 2,
            },
            HeadwordRow {
                word: "zebra".to_string(),
                rank: 0,
                occurrences: 1,
            },
        ];
        let table = render_table(&rows, "\n");
        let expected = [
            "WORD  COCA  OCC  ",
            "----  ----  ---  ",
            "run   6     2    ",
            "zebra 0     1    ",
            "",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_table_has_headers_only() {
        let table = render_table(&[], "\r\n");
        assert_eq!(table, "WORD COCA  OCC  \r\n---- ----  ---  \r\n");
    }

    #[test]
    fn report_collects_everything() {
        let book = book("ran is zebra");
        let report = CoverageReport::build(&book, &DEFAULT_THRESHOLDS, SortKey::Coca, false);
        assert_eq!(report.total, 3);
        assert_eq!(report.distinct, 3);
        assert_eq!(report.points.len(), DEFAULT_THRESHOLDS.len());
        assert_eq!(report.words.len(), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["points"][0]["threshold"], 4_000);
    }

    #[test]
    fn sort_key_round_trips_through_serde() {
        let key: SortKey = serde_json::from_str("\"occ\"").unwrap();
        assert_eq!(key, SortKey::Occ);
        assert_eq!(SortKey::default().as_str(), "coca");
    }
}
