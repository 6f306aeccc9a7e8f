use ginkgo_tree::TreeError;

/// Errors from tree annotation.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Returned when a row cannot be routed through the fitted tree,
    /// typically because its feature dimensionality does not match the
    /// tree's. The underlying tree error is surfaced, not masked.
    #[error("failed to route sample {sample_index} through the tree")]
    Routing {
        /// Zero-based row index of the sample that could not be routed.
        sample_index: usize,
        /// The underlying traversal error.
        source: TreeError,
    },
}
