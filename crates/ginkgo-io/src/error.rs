//! I/O error types for ginkgo-io.

use std::path::PathBuf;

/// Errors from dataset parsing, splitting, and artifact writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error at byte offset {offset}")]
    CsvParse {
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV contains a header but zero data rows.
    #[error("empty dataset (no data rows)")]
    EmptyDataset,

    /// Returned when the CSV header has fewer than two columns (at least
    /// one feature plus the label column are required).
    #[error("dataset header has {got} columns, need at least 2")]
    TooFewColumns {
        /// Actual number of header columns.
        got: usize,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a feature cell is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based column index.
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when a label cell is not a non-negative integer.
    #[error("invalid class label: row {row_index}, raw value \"{raw}\"")]
    InvalidClassLabel {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when the test fraction is outside (0.0, 1.0).
    #[error("test_fraction must be in (0.0, 1.0), got {fraction}")]
    InvalidTestFraction {
        /// The invalid test_fraction value provided.
        fraction: f64,
    },

    /// Returned when a split would leave the training or held-out portion empty.
    #[error("degenerate split: {n_samples} samples with {n_test} held out")]
    DegenerateSplit {
        /// Total number of samples.
        n_samples: usize,
        /// Number of samples that would be held out.
        n_test: usize,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the artifact file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
