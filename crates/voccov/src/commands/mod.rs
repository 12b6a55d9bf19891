//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};
use voccov_core::ReferenceData;

pub mod coverage;
pub mod info;

/// Load the frequency list and lemma table.
///
/// A spinner is drawn on stderr while loading unless `show_progress` is
/// false; indicatif hides it on its own when stderr is not a terminal.
pub fn load_reference(
    frequency_list: &Utf8Path,
    lemma_file: &Utf8Path,
    show_progress: bool,
) -> anyhow::Result<ReferenceData> {
    let spinner = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("loading {frequency_list} and {lemma_file}"));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let reference = ReferenceData::load(frequency_list, lemma_file)
        .with_context(|| format!("failed to load reference data from {frequency_list} and {lemma_file}"));

    spinner.finish_and_clear();
    reference
}
