//! The `voccov` command line, as a library.
//!
//! `main.rs` parses [`Cli`] and dispatches to [`commands`]. The parser is
//! exposed here so `xtask` can render man pages and shell completions from
//! [`command()`], and so integration tests share one definition.

pub mod commands;
pub mod plot;

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when the output stream supports it.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Install this choice as the process-wide owo-colors override.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const AFTER_LONG_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                Log filter, e.g. `debug` or `voccov_core=trace`
    VOCCOV_LOG_PATH         Write JSON logs to this file
    VOCCOV_LOG_DIR          Write JSON logs to voccov.jsonl in this directory
    VOCCOV_FREQUENCY_LIST   Frequency list (default: COCA60000.txt)
    VOCCOV_LEMMA_FILE       Lemma table (default: lemmas.txt)
    VOCCOV_<FIELD>          Any other config field, e.g. VOCCOV_SORT=occ
";

/// Vocabulary coverage of a text against a word frequency list.
#[derive(Parser)]
#[command(name = "voccov", version, about, long_about = None)]
#[command(arg_required_else_help = true, after_long_help = AFTER_LONG_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Load this config file after discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before doing anything else
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// When to color output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Report how much of a text the top-N frequent words cover
    Coverage(commands::coverage::CoverageArgs),

    /// Show version and effective configuration
    Info(commands::info::InfoArgs),
}

/// The clap command tree, for documentation generation.
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn thresholds_split_on_commas() {
        let cli = Cli::try_parse_from(["voccov", "coverage", "-i", "b.txt", "--thresholds", "10,20"])
            .unwrap();
        let Some(Commands::Coverage(args)) = cli.command else {
            panic!("expected coverage");
        };
        assert_eq!(args.thresholds, Some(vec![10, 20]));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["voccov", "info", "--json", "-vv", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }
}
