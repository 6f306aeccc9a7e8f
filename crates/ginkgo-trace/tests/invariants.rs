//! Structural invariant tests for ginkgo-trace.
//!
//! These tests verify the routing/annotation invariants on deterministic
//! synthetic datasets: per-node histograms agree with sample membership,
//! interior nodes partition their samples exactly between their children,
//! and the Gini derivation text agrees with the numeric value.

use ginkgo_trace::{AnnotatedNode, annotate, route_samples};
use ginkgo_tree::DecisionTreeConfig;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a 120-sample, 4-feature, 3-class classification dataset.
///
/// Feature 0 is informative (class * 4.0 + noise in [0, 1)); the rest are
/// pure noise. Samples are assigned round-robin across classes.
fn make_classification() -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let n_samples = 120;
    let n_classes = 3;

    let mut features = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(class);
        let row: Vec<f64> = (0..4)
            .map(|f| {
                let base = if f == 0 { class as f64 * 4.0 } else { 0.0 };
                base + rng.r#gen::<f64>()
            })
            .collect();
        features.push(row);
    }
    (features, labels)
}

/// Collect every node of an annotated tree in depth-first order.
fn collect<'a>(root: &'a AnnotatedNode, out: &mut Vec<&'a AnnotatedNode>) {
    out.push(root);
    if let Some(left) = &root.left {
        collect(left, out);
    }
    if let Some(right) = &root.right {
        collect(right, out);
    }
}

// ---------------------------------------------------------------------------
// a) histogram_matches_membership
// ---------------------------------------------------------------------------

/// For every node, `class_counts` must sum to `samples.len()` and agree
/// with a recount over the label vector.
#[test]
fn histogram_matches_membership() {
    let (features, labels) = make_classification();
    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(3))
        .with_seed(42)
        .fit(&features, &labels)
        .unwrap();
    let routing = route_samples(&tree, &features).unwrap();
    let root = annotate(&tree, &labels, &routing);

    let mut nodes = Vec::new();
    collect(&root, &mut nodes);

    for node in nodes {
        let total: usize = node.class_counts.iter().sum();
        assert_eq!(total, node.samples.len(), "node {}", node.id);

        let mut recount = vec![0usize; node.class_counts.len()];
        for &row in &node.samples {
            recount[labels[row]] += 1;
        }
        assert_eq!(recount, node.class_counts, "node {}", node.id);
    }
}

// ---------------------------------------------------------------------------
// b) children_partition_parent
// ---------------------------------------------------------------------------

/// Every interior node's samples must be exactly the disjoint union of its
/// children's samples.
#[test]
fn children_partition_parent() {
    let (features, labels) = make_classification();
    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(3))
        .with_seed(42)
        .fit(&features, &labels)
        .unwrap();
    let routing = route_samples(&tree, &features).unwrap();
    let root = annotate(&tree, &labels, &routing);

    let mut nodes = Vec::new();
    collect(&root, &mut nodes);

    for node in nodes {
        let (Some(left), Some(right)) = (&node.left, &node.right) else {
            continue;
        };
        assert_eq!(
            node.samples.len(),
            left.samples.len() + right.samples.len(),
            "node {}",
            node.id
        );
        let mut merged: Vec<usize> = left
            .samples
            .iter()
            .chain(right.samples.iter())
            .copied()
            .collect();
        merged.sort_unstable();
        assert_eq!(merged, node.samples, "node {}", node.id);
    }
}

// ---------------------------------------------------------------------------
// c) gini_range_and_derivation_agreement
// ---------------------------------------------------------------------------

/// Gini must lie in [0, 1) everywhere, and the trailing number of each
/// derivation must equal the node's gini rounded to 3 decimals.
#[test]
fn gini_range_and_derivation_agreement() {
    let (features, labels) = make_classification();
    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(3))
        .with_seed(42)
        .fit(&features, &labels)
        .unwrap();
    let routing = route_samples(&tree, &features).unwrap();
    let root = annotate(&tree, &labels, &routing);

    let mut nodes = Vec::new();
    collect(&root, &mut nodes);

    for node in nodes {
        assert!(
            (0.0..1.0).contains(&node.gini),
            "node {}: gini {}",
            node.id,
            node.gini
        );
        let trailing = node.gini_calc.rsplit("= ").next().unwrap();
        assert_eq!(
            trailing,
            format!("{:.3}", node.gini),
            "node {}: {}",
            node.id,
            node.gini_calc
        );
    }
}

// ---------------------------------------------------------------------------
// d) two_level_tree_60_30
// ---------------------------------------------------------------------------

/// A 90-row, two-class dataset separable into 60/30 must produce a
/// depth-1 tree whose root holds all 90 rows, splits them disjointly into
/// the 60-row and 30-row leaves, and whose label vector length equals the
/// root's sample count.
#[test]
fn two_level_tree_60_30() {
    // 60 rows of class 0 clustered low, 30 rows of class 1 clustered high.
    let mut features = Vec::with_capacity(90);
    let mut labels = Vec::with_capacity(90);
    for i in 0..60 {
        features.push(vec![i as f64 * 0.01]);
        labels.push(0);
    }
    for i in 0..30 {
        features.push(vec![10.0 + i as f64 * 0.01]);
        labels.push(1);
    }

    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(1))
        .with_seed(42)
        .fit(&features, &labels)
        .unwrap();
    assert_eq!(tree.n_nodes(), 3);

    let routing = route_samples(&tree, &features).unwrap();
    let root = annotate(&tree, &labels, &routing);

    assert_eq!(root.samples.len(), 90);
    assert_eq!(labels.len(), root.samples.len());

    let left = root.left.as_ref().unwrap();
    let right = root.right.as_ref().unwrap();
    let mut sizes = [left.samples.len(), right.samples.len()];
    sizes.sort_unstable();
    assert_eq!(sizes, [30, 60]);

    // Disjoint union.
    let mut merged: Vec<usize> = left
        .samples
        .iter()
        .chain(right.samples.iter())
        .copied()
        .collect();
    merged.sort_unstable();
    assert_eq!(merged, (0..90).collect::<Vec<_>>());

    // Both leaves are pure, root is not.
    assert_eq!(left.gini, 0.0);
    assert_eq!(right.gini, 0.0);
    assert!(root.gini > 0.0);
}

// ---------------------------------------------------------------------------
// e) annotation_is_deterministic
// ---------------------------------------------------------------------------

/// Two runs over the same inputs must serialize to identical JSON.
#[test]
fn annotation_is_deterministic() {
    let (features, labels) = make_classification();
    let config = DecisionTreeConfig::new().with_max_depth(Some(3)).with_seed(42);

    let tree1 = config.fit(&features, &labels).unwrap();
    let tree2 = config.fit(&features, &labels).unwrap();

    let routing1 = route_samples(&tree1, &features).unwrap();
    let routing2 = route_samples(&tree2, &features).unwrap();

    let json1 = serde_json::to_string(&annotate(&tree1, &labels, &routing1)).unwrap();
    let json2 = serde_json::to_string(&annotate(&tree2, &labels, &routing2)).unwrap();
    assert_eq!(json1, json2);
}

// ---------------------------------------------------------------------------
// f) round_trip_preserves_exact_fields
// ---------------------------------------------------------------------------

/// Serializing and re-parsing must preserve `id`, `samples`, and
/// `class_counts` exactly, and `gini` within floating rounding.
#[test]
fn round_trip_preserves_exact_fields() {
    let (features, labels) = make_classification();
    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(3))
        .with_seed(42)
        .fit(&features, &labels)
        .unwrap();
    let routing = route_samples(&tree, &features).unwrap();
    let root = annotate(&tree, &labels, &routing);

    let json = serde_json::to_string_pretty(&root).unwrap();
    let parsed: AnnotatedNode = serde_json::from_str(&json).unwrap();

    let mut original_nodes = Vec::new();
    let mut parsed_nodes = Vec::new();
    collect(&root, &mut original_nodes);
    collect(&parsed, &mut parsed_nodes);
    assert_eq!(original_nodes.len(), parsed_nodes.len());

    for (a, b) in original_nodes.iter().zip(&parsed_nodes) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.class_counts, b.class_counts);
        assert!((a.gini - b.gini).abs() < 1e-12);
    }
}
