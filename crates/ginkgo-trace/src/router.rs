//! Sample routing: which rows pass through which tree nodes.

use ginkgo_tree::DecisionTree;
use tracing::{debug, instrument};

use crate::TraceError;

/// Per-node sample membership for a routed feature matrix.
///
/// `rows(node_id)` is the ascending sequence of row indices whose
/// root-to-leaf traversal visits `node_id`. Every node id in
/// `0..n_nodes()` is covered; nodes no row reaches map to an empty slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSamples {
    per_node: Vec<Vec<usize>>,
}

impl NodeSamples {
    /// Return the ascending row indices routed through the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node_id` is out of bounds. All ids in `0..n_nodes()`
    /// are valid.
    #[must_use]
    pub fn rows(&self, node_id: usize) -> &[usize] {
        &self.per_node[node_id]
    }

    /// Return the number of nodes covered by this routing.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.per_node.len()
    }
}

/// Route every row of a feature matrix through the tree and invert the
/// resulting decision paths into per-node row-index sequences.
///
/// Rows are processed in ascending order, so each node's sequence comes out
/// sorted with no duplicates (a single traversal visits a node at most
/// once). An empty matrix yields an all-empty mapping.
///
/// # Errors
///
/// Returns [`TraceError::Routing`] when a row's feature dimensionality does
/// not match the tree's; the tree's own validation error is carried as the
/// source.
#[instrument(skip_all, fields(n_rows = features.len(), n_nodes = tree.n_nodes()))]
pub fn route_samples(
    tree: &DecisionTree,
    features: &[Vec<f64>],
) -> Result<NodeSamples, TraceError> {
    let mut per_node: Vec<Vec<usize>> = vec![Vec::new(); tree.n_nodes()];

    for (row, sample) in features.iter().enumerate() {
        let path = tree
            .decision_path(sample)
            .map_err(|source| TraceError::Routing {
                sample_index: row,
                source,
            })?;
        for id in path {
            per_node[id.index()].push(row);
        }
    }

    debug!(n_rows = features.len(), "samples routed");

    Ok(NodeSamples { per_node })
}

#[cfg(test)]
mod tests {
    use ginkgo_tree::DecisionTreeConfig;

    use super::route_samples;
    use crate::TraceError;

    fn separable() -> (Vec<Vec<f64>>, Vec<usize>) {
        let features = vec![
            vec![1.0],
            vec![2.0],
            vec![3.0],
            vec![10.0],
            vec![11.0],
            vec![12.0],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        (features, labels)
    }

    #[test]
    fn root_covers_every_row() {
        let (features, labels) = separable();
        let tree = DecisionTreeConfig::new().fit(&features, &labels).unwrap();
        let routing = route_samples(&tree, &features).unwrap();
        assert_eq!(routing.rows(0), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn every_node_is_covered() {
        let (features, labels) = separable();
        let tree = DecisionTreeConfig::new().fit(&features, &labels).unwrap();
        let routing = route_samples(&tree, &features).unwrap();
        assert_eq!(routing.n_nodes(), tree.n_nodes());
    }

    #[test]
    fn node_sequences_are_sorted_and_unique() {
        let (features, labels) = separable();
        let tree = DecisionTreeConfig::new().fit(&features, &labels).unwrap();
        let routing = route_samples(&tree, &features).unwrap();
        for id in 0..routing.n_nodes() {
            let rows = routing.rows(id);
            assert!(rows.windows(2).all(|w| w[0] < w[1]), "node {id}: {rows:?}");
        }
    }

    #[test]
    fn empty_matrix_routes_to_empty_sequences() {
        let (features, labels) = separable();
        let tree = DecisionTreeConfig::new().fit(&features, &labels).unwrap();
        let routing = route_samples(&tree, &[]).unwrap();
        assert_eq!(routing.n_nodes(), tree.n_nodes());
        for id in 0..routing.n_nodes() {
            assert!(routing.rows(id).is_empty());
        }
    }

    #[test]
    fn dimensionality_mismatch_surfaces_routing_error() {
        let (features, labels) = separable();
        let tree = DecisionTreeConfig::new().fit(&features, &labels).unwrap();
        let bad = vec![vec![1.0], vec![2.0, 3.0]];
        let err = route_samples(&tree, &bad).unwrap_err();
        assert!(matches!(err, TraceError::Routing { sample_index: 1, .. }));
    }
}
