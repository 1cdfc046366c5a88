mod config;
mod model;
mod normalizer;
mod parser;
mod scraper;
mod storage;

use crate::scraper::{HttpFetcher, WorkerPool};
use config::{load_config, AppConfig};
use model::PipelineError;
use parser::RemoteOkParser;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use storage::{Collector, RunSummary, Sink};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Capacity of the page event channel between the worker pool and the collector.
const EVENT_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(summary) => {
            info!(
                "Done: {} records from {} page(s), {} page(s) failed",
                summary.records, summary.pages_ok, summary.pages_failed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<RunSummary, PipelineError> {
    // The output file must exist before anything is fetched.
    let output_path = config.output.path();
    let sink = Sink::create(&output_path, config.output.format)?;
    info!(
        "Writing {:?} output to {}",
        config.output.format,
        output_path.display()
    );

    let fetcher = HttpFetcher::new(&config)?;
    let parser = RemoteOkParser::new(config.classification)?;
    let pool = WorkerPool::new(
        Arc::new(fetcher),
        Arc::new(parser),
        config.effective_parallelism(),
    );
    let collector = Collector::new(sink, config.urls.len(), config.on_page_error);

    let (summary, _file) = scrape(pool, collector, config.urls).await?;
    Ok(summary)
}

/// Connects the pool to the collector through one event channel. Output is written by
/// the collector; on its failure the pool is aborted.
async fn scrape<W: Write + Send>(
    pool: WorkerPool,
    collector: Collector<W>,
    urls: Vec<String>,
) -> Result<(RunSummary, W), PipelineError> {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let handle = pool.spawn(urls, tx);

    let done = match collector.run(rx).await {
        Ok(done) => done,
        Err(e) => {
            handle.abort();
            return Err(e);
        }
    };
    handle.await?;

    Ok(done)
}
