//! Recursive assembly of the annotated tree record.

use ginkgo_tree::{DecisionTree, Node, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{NodeSamples, gini_breakdown};

/// A tree node annotated with its routed samples, class histogram, and
/// Gini derivation.
///
/// `left`/`right` are present only for interior nodes and are omitted from
/// the serialized form for leaves. The record is built once and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNode {
    /// Arena id of this node in the fitted tree.
    pub id: usize,
    /// Gini impurity of the class histogram.
    pub gini: f64,
    /// Step-by-step derivation of `gini` (see [`gini_breakdown`]).
    pub gini_calc: String,
    /// Ascending row indices routed through this node.
    pub samples: Vec<usize>,
    /// Per-class sample counts, one entry per class.
    pub class_counts: Vec<usize>,
    /// Left subtree, absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<AnnotatedNode>>,
    /// Right subtree, absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<AnnotatedNode>>,
}

/// Build the annotated record for the whole tree, rooted at node 0.
///
/// For each node the class histogram is computed over the rows that
/// `node_samples` routes through it, restricted to `labels` (which must be
/// row-aligned with the matrix the routing was built over). Traversal is
/// depth-first, left before right, so serialization is reproducible.
///
/// The routing must come from [`route_samples`](crate::route_samples) over
/// the same tree; a routing for a different tree is a precondition
/// violation.
#[instrument(skip_all, fields(n_nodes = tree.n_nodes()))]
#[must_use]
pub fn annotate(tree: &DecisionTree, labels: &[usize], node_samples: &NodeSamples) -> AnnotatedNode {
    debug_assert_eq!(
        node_samples.n_nodes(),
        tree.n_nodes(),
        "routing does not cover this tree"
    );
    annotate_node(tree, labels, node_samples, tree.root())
}

fn annotate_node(
    tree: &DecisionTree,
    labels: &[usize],
    node_samples: &NodeSamples,
    id: NodeIndex,
) -> AnnotatedNode {
    let rows = node_samples.rows(id.index());

    let mut class_counts = vec![0usize; tree.n_classes()];
    for &row in rows {
        class_counts[labels[row]] += 1;
    }

    let (gini, gini_calc) = gini_breakdown(&class_counts);

    let (left, right) = match tree.node(id) {
        Node::Leaf { .. } => (None, None),
        Node::Split { left, right, .. } => (
            Some(Box::new(annotate_node(tree, labels, node_samples, *left))),
            Some(Box::new(annotate_node(tree, labels, node_samples, *right))),
        ),
    };

    AnnotatedNode {
        id: id.index(),
        gini,
        gini_calc,
        samples: rows.to_vec(),
        class_counts,
        left,
        right,
    }
}
