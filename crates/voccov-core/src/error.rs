//! Error types for voccov-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading the frequency list or lemma table.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// A reference file could not be read.
    #[error("failed to read reference file {path}")]
    Read {
        /// Path of the file that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The frequency list contains no words.
    #[error("frequency list is empty")]
    EmptyFrequencyList,

    /// The lemma table contains no entries.
    #[error("lemma table is empty")]
    EmptyLemmaTable,
}

/// Result type alias using [`ReferenceError`].
pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Errors returned by headword lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The word is neither a headword nor an inflection of one.
    #[error("no headword found for {0:?}")]
    UnknownWord(String),
}

/// Result type alias using [`LookupError`].
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur when building a [`Book`](crate::book::Book) from a file.
#[derive(Error, Debug)]
pub enum BookError {
    /// The input file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path of the input file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error(
        "input too large: {path} is {size} bytes (limit: {limit} bytes; set disable_input_limit = true to lift it)"
    )]
    TooLarge {
        /// Path of the input file.
        path: Utf8PathBuf,
        /// Actual file size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`BookError`].
pub type BookResult<T> = Result<T, BookError>;
