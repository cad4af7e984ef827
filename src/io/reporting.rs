// src/io/reporting.rs

use crate::error::{SimError, SimResult};
use crate::io::sink::{Channel, ResultRow, RowSink};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Creates the output directory (and parents) if it does not exist yet.
pub fn prepare_output_dir(dir: &Path) -> SimResult<()> {
    let existed = dir.is_dir();
    fs::create_dir_all(dir)?;
    if !existed {
        info!(dir = %dir.display(), "created output directory");
    }
    Ok(())
}

/// Writes one channel to `<dir>/<channel file name>` as CSV.
///
/// The header goes out when the file is opened; rows are serialized as they
/// arrive and flushed on `close`.
pub struct CsvSink {
    channel: Channel,
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    rows: usize,
}

impl CsvSink {
    pub fn create(dir: &Path, channel: Channel) -> SimResult<Self> {
        let path = dir.join(channel.file_name());
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(channel.header())?;

        debug!(%channel, path = %path.display(), "opened CSV sink");
        Ok(Self {
            channel,
            path,
            writer: Some(writer),
            rows: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSink for CsvSink {
    fn channel(&self) -> Channel {
        self.channel
    }

    fn write_row(&mut self, row: &ResultRow) -> SimResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| SimError::sink(self.channel, "write after close"))?;
        writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    fn close(&mut self) -> SimResult<()> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| SimError::sink(self.channel, "already closed"))?;

        // Flush the buffer to ensure all data is written
        writer.flush()?;

        info!(
            channel = %self.channel,
            rows = self.rows,
            path = %self.path.display(),
            "exported rows"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(dir.path(), Channel::Cost).unwrap();
        sink.write_row(&ResultRow::new(1000, 250.5)).unwrap();
        sink.write_row(&ResultRow::new(1010, 0.0)).unwrap();
        sink.close().unwrap();

        let text = fs::read_to_string(dir.path().join("CostAnalysis.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Stock, Average Cost", "1000,250.5", "1010,0.0"]);
    }

    #[test]
    fn empty_channel_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(dir.path(), Channel::Deviation).unwrap();
        sink.close().unwrap();

        let text = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(text.trim_end(), "Iterations, StdDeviation");
    }

    #[test]
    fn rejects_rows_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(dir.path(), Channel::Risk).unwrap();
        sink.close().unwrap();
        assert!(matches!(
            sink.write_row(&ResultRow::new(1, 0.5)),
            Err(SimError::Sink { .. })
        ));
        assert!(sink.close().is_err());
    }

    #[test]
    fn prepare_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("CSV").join("run");
        prepare_output_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // second call keeps what is already there
        let kept = nested.join("CostAnalysis.csv");
        fs::write(&kept, "x").unwrap();
        prepare_output_dir(&nested).unwrap();
        assert_eq!(fs::read_to_string(&kept).unwrap(), "x");
    }

    #[test]
    fn missing_dir_surfaces_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            CsvSink::create(&missing, Channel::Cost),
            Err(SimError::Csv(_))
        ));
    }
}
