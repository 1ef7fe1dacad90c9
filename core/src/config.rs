use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    #[serde(default)]
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestConfig {
    #[serde(default = "TestConfig::default_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "TestConfig::default_interpreters")]
    pub interpreter: Vec<InterpreterConfig>,
}

/// Files ending with `.{extension}` are run as `{command...} {file}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpreterConfig {
    pub extension: String,
    pub command: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: Self::default_time_limit_ms(),
            interpreter: Self::default_interpreters(),
        }
    }
}

impl TestConfig {
    fn default_time_limit_ms() -> u64 {
        10_000
    }

    fn default_interpreters() -> Vec<InterpreterConfig> {
        vec![InterpreterConfig {
            extension: "py".to_owned(),
            command: vec!["python3".to_owned()],
        }]
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    pub fn find_interpreter_for_extension(&self, ext: impl AsRef<str>) -> Option<&[String]> {
        let ext = ext.as_ref();
        self.interpreter
            .iter()
            .find(|entry| entry.extension == ext)
            .map(|entry| entry.command.as_slice())
    }
}

impl Config {
    pub const FILENAME: &str = "contest.toml";

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Load the config file found in `cur_dir` or its ancestors.
    /// Falls back to the built-in defaults when there is none.
    pub fn from_file_finding_in_ancestors_or_default(
        cur_dir: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        match fsutil::find_file_in_ancestors(cur_dir, Self::FILENAME) {
            Some(path) => {
                log::info!("Using config {:?}", path);
                Self::from_toml_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
