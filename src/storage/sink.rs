use crate::config::OutputFormat;
use crate::model::{JobRecord, SinkError};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::warn;

pub const CSV_HEADER: [&str; 4] = ["Job Title", "Company", "Location", "Salary"];

enum Output<W: Write> {
    /// Rows are written as they arrive.
    Csv(csv::Writer<W>),
    /// Everything is encoded once in `finish`.
    Json(W),
}

struct SinkState<W: Write> {
    records: Vec<JobRecord>,
    output: Output<W>,
}

/// Sole owner of the collected records and of the output writer.
pub struct Sink<W: Write> {
    state: Mutex<SinkState<W>>,
}

impl Sink<File> {
    /// Creates (or truncates) the output file.
    pub fn create(path: impl AsRef<Path>, format: OutputFormat) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Sink::new(file, format)
    }
}

impl<W: Write + Send> Sink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Result<Self, SinkError> {
        let output = match format {
            OutputFormat::Csv => {
                let mut csv = csv::Writer::from_writer(writer);
                csv.write_record(CSV_HEADER)?;
                Output::Csv(csv)
            }
            OutputFormat::Json => Output::Json(writer),
        };

        Ok(Self {
            state: Mutex::new(SinkState {
                records: Vec::new(),
                output,
            }),
        })
    }

    /// Safe to call from many tasks at once; a failed CSV row is logged and skipped.
    pub async fn append(&self, record: JobRecord) {
        let mut state = self.state.lock().await;

        if let Output::Csv(csv) = &mut state.output {
            let location = record.location_cell();
            let row = [
                record.title.as_str(),
                record.company.as_str(),
                location.as_str(),
                record.salary.as_str(),
            ];
            if let Err(e) = csv.write_record(row) {
                warn!("Could not write record to CSV: {}", e);
            }
        }

        state.records.push(record);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Flushes everything and hands the writer back.
    pub fn finish(self) -> Result<W, SinkError> {
        let SinkState { records, output } = self.state.into_inner();

        match output {
            Output::Csv(mut csv) => {
                csv.flush()?;
                csv.into_inner()
                    .map_err(|e| SinkError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
            }
            Output::Json(mut writer) => {
                serde_json::to_writer_pretty(&mut writer, &records)?;
                writer.write_all(b"\n")?;
                writer.flush()?;
                Ok(writer)
            }
        }
    }
}
