use crate::config::PageErrorPolicy;
use crate::model::{PageEvent, PipelineError};
use crate::storage::sink::Sink;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_ok: usize,
    pub pages_failed: usize,
    pub records: usize,
}

/// Single consumer of the page event stream; owns the sink until output is written.
pub struct Collector<W: Write> {
    sink: Sink<W>,
    expected_pages: usize,
    policy: PageErrorPolicy,
}

impl<W: Write + Send> Collector<W> {
    pub fn new(sink: Sink<W>, expected_pages: usize, policy: PageErrorPolicy) -> Self {
        Self {
            sink,
            expected_pages,
            policy,
        }
    }

    /// Appends rows until every page has reported and the channel has closed, then
    /// writes the output. Under `PageErrorPolicy::Abort` the first failed page ends
    /// the run without writing anything further.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<PageEvent>,
    ) -> Result<(RunSummary, W), PipelineError> {
        let mut summary = RunSummary::default();

        while let Some(event) = events.recv().await {
            match event {
                PageEvent::Row { url, record } => {
                    info!(
                        "Job Title: {} | Company: {} | Location: {} | Salary: {} ({})",
                        record.title,
                        record.company,
                        record.location_cell(),
                        record.salary,
                        url
                    );
                    self.sink.append(record).await;
                    summary.records += 1;
                }
                PageEvent::PageDone { url, rows } => {
                    summary.pages_ok += 1;
                    info!(
                        "Scraped {} ({} rows), {}/{} pages complete",
                        url,
                        rows,
                        summary.pages_ok + summary.pages_failed,
                        self.expected_pages
                    );
                }
                PageEvent::PageFailed { url, error } => match self.policy {
                    PageErrorPolicy::Abort => {
                        return Err(PipelineError::PageFailed { url, source: error });
                    }
                    PageErrorPolicy::Skip => {
                        summary.pages_failed += 1;
                        warn!("Skipping {}: {}", url, error);
                    }
                },
            }
        }

        // Channel closed: every page visit has dropped its sender.
        let completed = summary.pages_ok + summary.pages_failed;
        if completed < self.expected_pages {
            warn!(
                "Only {}/{} pages reported completion, writing what arrived",
                completed, self.expected_pages
            );
        }

        let collected = self.sink.len().await;
        let writer = self.sink.finish()?;
        info!("Wrote {} records", collected);
        Ok((summary, writer))
    }
}
