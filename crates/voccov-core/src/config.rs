//! Layered configuration.
//!
//! Settings are merged from, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. the user file, `config.<ext>` in [`user_config_dir`]
//! 3. project files: the nearest directory at or above the search root that
//!    holds `.voccov.<ext>` or `voccov.<ext>` (the plain name beats the
//!    dotfile). The walk stops at a directory containing `.git`.
//! 4. files passed explicitly, in the order given
//! 5. `VOCCOV_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`; within one directory files
//! merge in that order.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use voccov_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(Utf8Path::new("."))
//!     .load()?;
//! println!("frequency list: {}", config.frequency_list_path());
//! println!("loaded from: {:?}", sources.primary_file());
//! # Ok::<(), voccov_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::reference::{DEFAULT_FREQUENCY_LIST, DEFAULT_LEMMA_FILE};
use crate::report::{DEFAULT_THRESHOLDS, SortKey};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// The configuration for voccov.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON) and `VOCCOV_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Frequency list, one word per line (default: `COCA60000.txt`).
    pub frequency_list: Option<Utf8PathBuf>,
    /// Lemma table, `headword<TAB>inflections` per line (default: `lemmas.txt`).
    pub lemma_file: Option<Utf8PathBuf>,
    /// Coverage thresholds to report. Omit for the built-in ladder.
    pub thresholds: Option<Vec<usize>>,
    /// Default sort column for the headword table.
    pub sort: Option<SortKey>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    /// Default: `false`.
    #[serde(default)]
    pub disable_input_limit: bool,
}

impl Config {
    /// Frequency list path, falling back to [`DEFAULT_FREQUENCY_LIST`].
    pub fn frequency_list_path(&self) -> Utf8PathBuf {
        self.frequency_list
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_FREQUENCY_LIST))
    }

    /// Lemma table path, falling back to [`DEFAULT_LEMMA_FILE`].
    pub fn lemma_file_path(&self) -> Utf8PathBuf {
        self.lemma_file
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LEMMA_FILE))
    }

    /// Thresholds to report, falling back to [`DEFAULT_THRESHOLDS`].
    pub fn thresholds(&self) -> Vec<usize> {
        self.thresholds
            .clone()
            .unwrap_or_else(|| DEFAULT_THRESHOLDS.to_vec())
    }

    /// Effective input size limit, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Minimum level for log events when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Lookup and loading detail.
    Debug,
    /// Progress messages.
    #[default]
    Info,
    /// Skipped words and suspicious input.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The files that contributed to a loaded [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// File from the user config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files from the nearest project directory, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files given with `--config`, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values won, if any file was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files().last()
    }

    /// All files in merge order.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }

    /// True when no file was found.
    pub fn is_empty(&self) -> bool {
        self.files().next().is_none()
    }
}

const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];
const APP_NAME: &str = "voccov";
const ENV_PREFIX: &str = "VOCCOV_";
const DEFAULT_BOUNDARY: &str = ".git";

/// Discovers config files and merges them into a [`Config`].
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user file and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(DEFAULT_BOUNDARY.to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Search for project files starting at `dir` and walking up.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the project walk above a directory that contains `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` after every discovered file.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source into a [`Config`].
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();

        let figment = sources
            .files()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                merge_file,
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|err| ConfigError::Deserialize(Box::new(err)))?;

        tracing::debug!(
            files = sources.files().count(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails with [`ConfigError::NotFound`]
    /// when no config file exists.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        if self.discover().is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    fn discover(&self) -> ConfigSources {
        ConfigSources {
            user_file: self.user_config.then(find_user_file).flatten(),
            project_files: self
                .search_root
                .as_deref()
                .map(|root| self.find_project_files(root))
                .unwrap_or_default(),
            explicit_files: self.explicit_files.clone(),
        }
    }

    /// Files in the nearest directory at or above `start` that has any.
    fn find_project_files(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = project_file_names()
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            let at_boundary = self
                .boundary
                .as_ref()
                .is_some_and(|marker| dir != start && dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

/// Candidate project file names in merge order: dotfiles, then plain names.
fn project_file_names() -> impl Iterator<Item = String> {
    let dotfiles = EXTENSIONS.iter().map(|ext| format!(".{APP_NAME}.{ext}"));
    let plain = EXTENSIONS.iter().map(|ext| format!("{APP_NAME}.{ext}"));
    dotfiles.chain(plain)
}

fn find_user_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge one file, picking the parser from its extension (TOML otherwise).
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => figment.merge(Toml::file_exact(path)),
    }
}

/// Platform config directory for voccov, e.g. `~/.config/voccov` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
