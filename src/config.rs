use std::path::{Path, PathBuf};

use config::{Config, Environment, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::coordinator::CoordinatorConfig;
use crate::counter::DEFAULT_TOP_N;
use crate::report::SectionOrder;

pub const ENV_PREFIX: &str = "NEWSWORDS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsWordsConfig {
    /// Newline-delimited JSON dataset.
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// One stop word per line. The built-in English list is used when unset.
    #[serde(default)]
    pub stop_words_path: Option<PathBuf>,
    /// An empty path disables file logging.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default)]
    pub section_order: SectionOrder,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
}

fn default_output() -> PathBuf {
    PathBuf::from("output.html")
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs/main.log")
}

impl NewsWordsConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: default_output(),
            top_n: default_top_n(),
            stop_words_path: None,
            log_file: default_log_file(),
            section_order: SectionOrder::default(),
            coordinator: CoordinatorConfig::default(),
        }
    }

    pub fn log_file(&self) -> Option<&Path> {
        Some(self.log_file.as_path()).filter(|p| !p.as_os_str().is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.coordinator.max_parallelism == Some(0) {
            return Err(ConfigError::Invalid(
                "coordinator.max_parallelism must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub top_n: Option<usize>,
}

impl ConfigOverrides {
    /// The JSON5 file to read: `--config`, else `CONFIG_PATH`.
    pub fn config_source(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| std::env::var_os("CONFIG_PATH").map(PathBuf::from))
    }
}

/// Merges, from lowest to highest priority: defaults, the JSON5 file
/// (`--config` or `CONFIG_PATH`), `NEWSWORDS_*` environment variables and
/// command line values.
pub fn load_config(overrides: ConfigOverrides) -> Result<NewsWordsConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(config_path) = overrides.config_source() {
        let config_path = path_to_string(config_path);
        builder = builder
            .add_source(config::File::with_name(&config_path).format(FileFormat::Json5));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("input", overrides.input.map(path_to_string))?
        .set_override_option("output", overrides.output.map(path_to_string))?
        .set_override_option("top_n", overrides.top_n.map(|n| n as u64))?
        .build()?;

    let config: NewsWordsConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}

fn path_to_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
