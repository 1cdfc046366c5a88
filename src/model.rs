// Core structs: JobRecord, PageEvent and the error types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One job listing extracted from a `tr.job` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub locations: Vec<String>,
    pub salary: String,
}

impl JobRecord {
    /// Value of the single "Location" column in CSV output.
    pub fn location_cell(&self) -> String {
        self.locations.join(", ")
    }
}

/// Messages sent from the worker pool to the collector.
#[derive(Debug)]
pub enum PageEvent {
    Row { url: String, record: JobRecord },
    PageDone { url: String, rows: usize },
    PageFailed { url: String, error: ScraperError },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("cannot build http client: {0}")]
    ClientBuild(String),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("output io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("page {url} failed: {source}")]
    PageFailed { url: String, source: ScraperError },
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error("worker pool task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
