//! Tree annotation: turn a fitted decision tree plus the dataset routed
//! through it into a nested, serializable record with per-node sample
//! membership, class histograms, and step-by-step Gini derivations.
//!
//! The pipeline is two calls: [`route_samples`] inverts per-row decision
//! paths into per-node row-index sequences, and [`annotate`] walks the tree
//! depth-first assembling one [`AnnotatedNode`] per reachable node.

mod annotate;
mod error;
mod gini;
mod router;

pub use annotate::{AnnotatedNode, annotate};
pub use error::TraceError;
pub use gini::gini_breakdown;
pub use router::{NodeSamples, route_samples};
