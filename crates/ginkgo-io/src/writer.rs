//! JSON artifact writer for the annotated tree export.

use std::fs;
use std::path::{Path, PathBuf};

use ginkgo_trace::AnnotatedNode;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::TestSample;

/// Writes the annotated-tree artifact to `tree_data.json`.
///
/// Creates the output directory on construction if it does not exist.
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display()))]
    pub fn new(output_dir: &Path) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Write the annotated tree, held-out samples, and training labels to
    /// `tree_data.json`.
    ///
    /// The artifact has exactly three top-level keys: `tree`,
    /// `test_samples`, and `train_labels`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_tree_data(
        &self,
        tree: &AnnotatedNode,
        test_samples: &[TestSample],
        train_labels: &[usize],
    ) -> Result<(), IoError> {
        let path = self.tree_data_path();

        let artifact = TreeDataArtifact {
            tree,
            test_samples,
            train_labels,
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "tree data written");
        Ok(())
    }

    /// Return the path of the artifact: `{output_dir}/tree_data.json`.
    #[must_use]
    pub fn tree_data_path(&self) -> PathBuf {
        self.output_dir.join("tree_data.json")
    }
}

// --- Shadow struct for JSON serialization ---

#[derive(Serialize)]
struct TreeDataArtifact<'a> {
    tree: &'a AnnotatedNode,
    test_samples: &'a [TestSample],
    train_labels: &'a [usize],
}
