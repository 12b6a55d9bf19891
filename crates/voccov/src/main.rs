//! voccov CLI entry point.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;
use voccov::{Cli, Commands, commands};
use voccov_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // With neither --version-only nor a subcommand, clap has already
    // printed help and exited.
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.clone())?;

    let log_dir = config.log_dir.clone().map(Utf8PathBuf::into_std_path_buf);
    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, filter)
        .context("failed to initialize logging")?;

    debug!(
        config_file = ?sources.primary_file(),
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        "starting"
    );

    let result = match command {
        Commands::Coverage(args) => {
            commands::coverage::cmd_coverage(args, cli.json, cli.quiet, &config)
        }
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

/// Discover project config from the working directory and merge `--config`.
fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path, "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|path| anyhow::anyhow!("{what} is not valid UTF-8: {}", path.display()))
}
