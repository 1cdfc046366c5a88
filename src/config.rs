use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_URLS: [&str; 3] = [
    "https://remoteok.com/remote-javascript-jobs",
    "https://remoteok.com/remote-python-jobs",
    "https://remoteok.com/remote-go-jobs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    fn default_path(self) -> PathBuf {
        match self {
            OutputFormat::Csv => PathBuf::from("jobs.csv"),
            OutputFormat::Json => PathBuf::from("jobs.json"),
        }
    }
}

/// How the repeated `div.location` entries of a row are split into locations and salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationPolicy {
    /// Entries carrying `$` or a money emoji are the salary, the rest are locations.
    #[default]
    Content,
    /// Entry 0 is the location, entry 1 the salary.
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageErrorPolicy {
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.format.default_path())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub urls: Vec<String>,
    pub parallelism: usize,
    pub output: OutputConfig,
    pub classification: ClassificationPolicy,
    pub on_page_error: PageErrorPolicy,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|u| u.to_string()).collect(),
            parallelism: 3,
            output: OutputConfig::default(),
            classification: ClassificationPolicy::default(),
            on_page_error: PageErrorPolicy::default(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) RemoteJobsScraper/0.1".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Worker count actually used: never zero, never more than there are URLs.
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.max(1).min(self.urls.len().max(1))
    }

    /// Per-request timeout, at least one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

/// Reads `path` as JSON. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
