//! Dataset provisioning, holdout splitting, and artifact writing for the
//! ginkgo pipeline.

mod dataset;
mod domain;
mod error;
mod holdout;
mod writer;

pub use domain::{Dataset, SplitDataset, TestSample};
pub use error::IoError;
pub use holdout::HoldoutSplit;
pub use writer::ResultWriter;
