use crate::model::PageEvent;
use crate::parser::Parser;
use crate::scraper::PageFetcher;

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Fetches and parses a fixed list of pages with bounded parallelism.
pub struct WorkerPool {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn Parser>,
    parallelism: usize,
}

impl WorkerPool {
    pub fn new(fetcher: Arc<dyn PageFetcher>, parser: Arc<dyn Parser>, parallelism: usize) -> Self {
        Self {
            fetcher,
            parser,
            parallelism: parallelism.max(1),
        }
    }

    /// Visits every URL, duplicates included, with at most `parallelism` pages in flight.
    ///
    /// Each visit holds its own clone of `tx`. The receiver sees the channel close only
    /// after the task and every visit it started have finished, which is the signal the
    /// collector waits for before writing output.
    pub fn spawn(self, urls: Vec<String>, tx: mpsc::Sender<PageEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let pool = &self;
            let total = urls.len();
            stream::iter(urls)
                .for_each_concurrent(pool.parallelism, |url| {
                    let tx = tx.clone();
                    async move { pool.visit(url, tx).await }
                })
                .await;
            debug!("Worker pool finished {} page(s)", total);
        })
    }

    async fn visit(&self, url: String, tx: mpsc::Sender<PageEvent>) {
        info!("Visiting {}", url);

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(error) => {
                warn!("Failed to visit {}: {}", url, error);
                if tx.send(PageEvent::PageFailed { url, error }).await.is_err() {
                    debug!("Collector closed before failure report");
                }
                return;
            }
        };

        // The DOM lives only inside parse(); nothing !Send is held across the sends below.
        let records = self.parser.parse(&html);
        let rows = records.len();

        for record in records {
            let event = PageEvent::Row {
                url: url.clone(),
                record,
            };
            if tx.send(event).await.is_err() {
                debug!("Collector closed, dropping remaining rows of {}", url);
                return;
            }
        }

        if tx.send(PageEvent::PageDone { url, rows }).await.is_err() {
            debug!("Collector closed before page completion");
        }
    }
}
