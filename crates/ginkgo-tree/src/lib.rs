//! CART decision tree classification with inspectable structure.
//!
//! Provides a hand-rolled decision tree classifier (Gini criterion, exact
//! split search) stored as an arena of index-linked nodes, plus the
//! per-sample decision-path traversal that downstream tooling uses to
//! reconstruct which rows pass through which nodes.

mod error;
mod node;
mod split;
mod tree;

pub use error::TreeError;
pub use node::{FeatureIndex, Node, NodeIndex};
pub use split::gini_impurity;
pub use tree::{DecisionTree, DecisionTreeConfig};
