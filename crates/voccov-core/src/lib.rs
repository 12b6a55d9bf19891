//! Core library for voccov.
//!
//! Measures how much of a text's vocabulary falls within the N most frequent
//! English words, crediting inflected forms to their headword.
//!
//! # Modules
//!
//! - [`reference`] - Frequency list and lemma table loading
//! - [`finder`] - Headword lookup ([`WordFinder`])
//! - [`text`] - Tokenization
//! - [`book`] - Per-text statistics and coverage ([`Book`])
//! - [`report`] - Coverage ladder and headword table
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use voccov_core::{Book, ReferenceData, WordFinder};
//!
//! let reference = ReferenceData::load(
//!     Utf8Path::new("COCA60000.txt"),
//!     Utf8Path::new("lemmas.txt"),
//! )
//! .expect("reference data");
//! let finder = WordFinder::new(reference.lemmas());
//! let book = Book::from_text("I ran while running.", &reference, &finder);
//!
//! println!("{:.2}% covered by the top 4000", book.coverage(4000));
//! ```
#![deny(unsafe_code)]

pub mod book;
pub mod config;
pub mod error;
pub mod finder;
pub mod reference;
pub mod report;
pub mod text;

pub use book::{Book, WordStat};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{
    BookError, BookResult, ConfigError, ConfigResult, LookupError, LookupResult, ReferenceError,
    ReferenceResult,
};
pub use finder::{Placement, WordFinder};
pub use reference::{Inflections, LemmaTable, RankList, ReferenceData};
pub use report::{CoveragePoint, CoverageReport, DEFAULT_THRESHOLDS, HeadwordRow, SortKey};
