//! Coverage command: how much of a text the top-N frequent words account for.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument, warn};

use voccov_core::report::render_table;
use voccov_core::{Book, Config, CoverageReport, SortKey, WordFinder};

use super::load_reference;
use crate::plot;

#[cfg(windows)]
const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEP: &str = "\n";

/// Arguments for the `coverage` subcommand.
#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// Text file to analyze.
    ///
    /// Files over 5 MiB are rejected unless `disable_input_limit = true` is
    /// set in config (or `VOCCOV_DISABLE_INPUT_LIMIT=true`). `max_input_bytes`
    /// changes the limit.
    #[arg(short, long, value_name = "FILE")]
    pub input: Utf8PathBuf,

    /// Write the headword table to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Sort the headword table by frequency rank or by occurrences.
    #[arg(short, long, value_enum)]
    pub sort: Option<SortKey>,

    /// Reverse the sort order.
    #[arg(short, long)]
    pub reverse: bool,

    /// Draw the coverage curve.
    #[arg(short, long)]
    pub plot: bool,

    /// Frequency list, one word per line, most frequent first.
    #[arg(long, value_name = "FILE")]
    pub frequency_list: Option<Utf8PathBuf>,

    /// Lemma table, `headword<TAB>inflection inflection` per line.
    #[arg(long, value_name = "FILE")]
    pub lemmas: Option<Utf8PathBuf>,

    /// Comma-separated thresholds to report (e.g. 1000,2000,4000).
    #[arg(long, value_delimiter = ',', value_name = "N,N")]
    pub thresholds: Option<Vec<usize>>,
}

/// Compute vocabulary coverage of a text file.
#[instrument(name = "cmd_coverage", skip_all, fields(input = %args.input))]
pub fn cmd_coverage(
    args: CoverageArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(
        output = ?args.output,
        sort = ?args.sort,
        reverse = args.reverse,
        plot = args.plot,
        "executing coverage command"
    );

    let frequency_list = args
        .frequency_list
        .clone()
        .unwrap_or_else(|| config.frequency_list_path());
    let lemma_file = args
        .lemmas
        .clone()
        .unwrap_or_else(|| config.lemma_file_path());
    let reference = load_reference(&frequency_list, &lemma_file, !(quiet || global_json))?;
    let finder = WordFinder::new(reference.lemmas());
    info!(
        ranked = reference.ranks().ranked_words(),
        headwords = finder.len(),
        special = finder.special_len(),
        "reference data loaded"
    );

    let book = Book::open(&args.input, config.input_limit(), &reference, &finder)
        .with_context(|| format!("failed to analyze {}", args.input))?;
    if book.is_empty() {
        warn!(input = %args.input, "no recognized words; coverage is 0%");
    }

    let thresholds = args.thresholds.clone().unwrap_or_else(|| config.thresholds());
    let sort = args.sort.or(config.sort).unwrap_or_default();
    let report = CoverageReport::build(&book, &thresholds, sort, args.reverse);

    if let Some(ref output) = args.output {
        std::fs::write(output.as_std_path(), render_table(&report.words, LINE_SEP))
            .with_context(|| format!("failed to write {output}"))?;
        debug!(output = %output, rows = report.words.len(), "headword table written");
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Total words:".bold(), report.total);
    for point in &report.points {
        println!("{point}");
    }

    match args.output {
        Some(ref output) => println!("{} {}", "Table written to".dimmed(), output.cyan()),
        None => {
            println!();
            print!("{}", render_table(&report.words, "\n"));
        }
    }

    if args.plot {
        let name = args.input.file_name().unwrap_or(args.input.as_str());
        println!();
        print!(
            "{}",
            plot::render(&format!("{name} stat data"), &report.points, plot::DEFAULT_WIDTH)
        );
    }

    Ok(())
}
