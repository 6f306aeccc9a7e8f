//! Built-in classification dataset, embedded at compile time.

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::Dataset;

/// Fisher's Iris dataset: 150 rows, 4 features, 3 classes.
/// Last column is the zero-based class label.
static IRIS_CSV: &str = include_str!("../data/iris.csv");

impl Dataset {
    /// Load the built-in Iris dataset.
    ///
    /// The CSV is embedded in the binary and fully validated on load:
    /// consistent row lengths, finite feature values, and non-negative
    /// integer labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::CsvParse`] | Malformed CSV record |
    /// | [`IoError::TooFewColumns`] | Header has fewer than 2 columns |
    /// | [`IoError::EmptyDataset`] | Zero data rows after header |
    /// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
    /// | [`IoError::NonFiniteValue`] | Feature cell is NaN, Inf, or unparseable |
    /// | [`IoError::InvalidClassLabel`] | Label cell is not a non-negative integer |
    #[instrument]
    pub fn builtin() -> Result<Self, IoError> {
        Self::from_csv(IRIS_CSV)
    }

    /// Parse and validate a features-plus-label CSV.
    ///
    /// Expected format: header row required; all columns but the last are
    /// feature columns, the last is the zero-based class label.
    pub(crate) fn from_csv(csv_text: &str) -> Result<Self, IoError> {
        // flexible(true) allows rows with varying column counts so that our
        // own InconsistentRowLength check fires instead of a low-level
        // CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        if expected_cols < 2 {
            return Err(IoError::TooFewColumns { got: expected_cols });
        }
        let feature_names: Vec<String> = header
            .iter()
            .take(expected_cols - 1)
            .map(str::to_string)
            .collect();
        debug!(expected_cols, "read CSV header");

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            // Parse feature values (all columns but the last).
            let mut row = Vec::with_capacity(expected_cols - 1);
            for col_index in 0..expected_cols - 1 {
                let raw = record.get(col_index).unwrap_or("");
                let value: f64 = raw.parse().map_err(|_| IoError::NonFiniteValue {
                    row_index,
                    col_index,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonFiniteValue {
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    });
                }
                row.push(value);
            }

            // Parse the label (last column).
            let raw_label = record.get(expected_cols - 1).unwrap_or("");
            let label: usize = raw_label.parse().map_err(|_| IoError::InvalidClassLabel {
                row_index,
                raw: raw_label.to_string(),
            })?;

            features.push(row);
            labels.push(label);
        }

        if features.is_empty() {
            return Err(IoError::EmptyDataset);
        }

        let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;

        info!(
            n_samples = features.len(),
            n_features = feature_names.len(),
            n_classes,
            "dataset loaded"
        );

        Ok(Dataset {
            features,
            labels,
            feature_names,
            n_classes,
        })
    }
}
