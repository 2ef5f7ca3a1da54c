//! Entry sinks: where completed entries go

use crate::constants::SENSOR_COUNT;
use crate::error::Error;
use crate::types::Entry;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Timestamp format for the CSV `Date` column
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for completed entries
pub trait EntrySink {
    /// Persist one entry; called once per completed (non-discarded) entry
    fn append(&mut self, entry: &Entry) -> Result<(), Error>;
}

/// Appends entries as rows of a CSV file
///
/// The file is created with a `Date,Sensor1,...,Sensor4` header row on the
/// first append if it is absent or empty; subsequent appends add rows
/// without re-emitting the header. Values are written with two decimal
/// places.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        }
    }
}

impl EntrySink for CsvSink {
    fn append(&mut self, entry: &Entry) -> Result<(), Error> {
        let write_header = self.needs_header();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            let mut header = Vec::with_capacity(SENSOR_COUNT + 1);
            header.push("Date".to_string());
            for i in 1..=SENSOR_COUNT {
                header.push(format!("Sensor{i}"));
            }
            writer.write_record(&header)?;
        }

        let mut row = Vec::with_capacity(SENSOR_COUNT + 1);
        row.push(entry.timestamp.format(DATE_FORMAT).to_string());
        for value in &entry.values {
            row.push(format!("{value:.2}"));
        }
        writer.write_record(&row)?;
        writer.flush()?;

        Ok(())
    }
}

/// Collects entries in memory (tests and offline replay)
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    /// Entries in emission order
    pub entries: Vec<Entry>,
}

impl VecSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntrySink for VecSink {
    fn append(&mut self, entry: &Entry) -> Result<(), Error> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
