//! Development tasks: man pages and shell completions.
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "voccov development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for voccov and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
        /// Only generate for this shell
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { out_dir, shell } => completions(&out_dir, shell),
    }
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let cmd = voccov::command();
    let name = cmd.get_name().to_string();
    write_man_page(out_dir, &name, cmd.clone())?;

    for sub in cmd.get_subcommands() {
        let page = format!("{name}-{}", sub.get_name());
        write_man_page(out_dir, &page, sub.clone().name(page.clone()))?;
    }
    Ok(())
}

fn write_man_page(out_dir: &Path, page: &str, cmd: clap::Command) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buffer)
        .with_context(|| format!("failed to render man page {page}"))?;

    let path = out_dir.join(format!("{page}.1"));
    fs::write(&path, buffer).with_context(|| format!("failed to write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn completions(out_dir: &Path, shell: Option<Shell>) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let shells = match shell {
        Some(shell) => vec![shell],
        None => vec![Shell::Bash, Shell::Elvish, Shell::Fish, Shell::PowerShell, Shell::Zsh],
    };
    let mut cmd = voccov::command();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "voccov", out_dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn man_writes_a_page_per_command() {
        let tmp = TempDir::new().unwrap();
        man(tmp.path()).unwrap();

        for page in ["voccov.1", "voccov-coverage.1", "voccov-info.1"] {
            let content = fs::read_to_string(tmp.path().join(page)).unwrap();
            assert!(content.contains(".TH"), "{page} is not a man page");
        }
        let coverage = fs::read_to_string(tmp.path().join("voccov-coverage.1")).unwrap();
        assert!(coverage.contains("input"));
    }

    #[test]
    fn completions_for_one_shell() {
        let tmp = TempDir::new().unwrap();
        completions(tmp.path(), Some(Shell::Bash)).unwrap();

        let script = fs::read_to_string(tmp.path().join("voccov.bash")).unwrap();
        assert!(script.contains("coverage"));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn completions_for_every_shell() {
        let tmp = TempDir::new().unwrap();
        completions(&tmp.path().join("nested"), None).unwrap();
        assert_eq!(fs::read_dir(tmp.path().join("nested")).unwrap().count(), 5);
    }
}
