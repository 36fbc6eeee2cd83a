//! Data loading utilities

use crate::error::{PrepError, Result};
use crate::preprocessing::PipelineReport;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Loader for delimited text files.
///
/// Every column is read as text. Interpreting values is left to the
/// preprocessing steps.
#[derive(Debug, Clone)]
pub struct DataLoader {
    delimiter: u8,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a new comma-separated data loader
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a CSV file with a header row.
    ///
    /// Returns [`PrepError::FileNotFound`] before any parsing when `path`
    /// does not point to an existing file.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PrepError::FileNotFound(path.to_path_buf()));
        }

        let parse_opts = CsvParseOptions::default().with_separator(self.delimiter);

        // Schema inference over zero rows reads every column as String.
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(parse_opts)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| PrepError::DataError(format!("{}: {}", path.display(), e)))
    }

    /// Get file info without loading full data
    pub fn get_file_info(&self, path: impl AsRef<Path>) -> Result<FileInfo> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PrepError::FileNotFound(path.to_path_buf()));
        }

        let file_size = std::fs::metadata(path)?.len();

        let header = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_n_rows(Some(0))
            .with_parse_options(CsvParseOptions::default().with_separator(self.delimiter))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| PrepError::DataError(format!("{}: {}", path.display(), e)))?;
        let columns: Vec<String> = header
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        Ok(FileInfo {
            path: path.display().to_string(),
            file_size,
            columns,
        })
    }
}

/// File information
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub file_size: u64,
    pub columns: Vec<String>,
}

/// Writers for processed data and run reports
pub struct DataSaver;

impl DataSaver {
    /// Save to CSV with a header row and no index column.
    ///
    /// An existing file at `path` is overwritten.
    pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
        let mut file = File::create(path.as_ref())?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(delimiter)
            .finish(df)
            .map_err(|e| PrepError::DataError(e.to_string()))
    }

    /// Save a pipeline report as pretty-printed JSON
    pub fn save_json_report(report: &PipelineReport, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, report)?;
        Ok(())
    }
}
