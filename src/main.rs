use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use ginkgo_io::{Dataset, HoldoutSplit, ResultWriter};
use ginkgo_trace::{annotate, route_samples};
use ginkgo_tree::DecisionTreeConfig;

// Fixed run parameters, matching the reference export this tool feeds.
const SEED: u64 = 42;
const TEST_FRACTION: f64 = 0.3;
const MAX_DEPTH: usize = 3;

#[derive(Serialize)]
struct ExportOutput {
    n_train: usize,
    n_test: usize,
    n_nodes: usize,
    tree_depth: usize,
    n_classes: usize,
    feature_names: Vec<String>,
    output_file: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let dataset = Dataset::builtin().context("failed to load built-in dataset")?;

    let split = HoldoutSplit::new(TEST_FRACTION)
        .context("invalid holdout configuration")?
        .with_seed(SEED)
        .split(&dataset)
        .context("failed to split dataset")?;

    let tree = DecisionTreeConfig::new()
        .with_max_depth(Some(MAX_DEPTH))
        .with_seed(SEED)
        .fit(&split.train_features, &split.train_labels)
        .context("failed to fit decision tree")?;
    info!(
        n_nodes = tree.n_nodes(),
        depth = tree.depth(),
        "decision tree fitted"
    );

    // Routing and labels are both drawn from the training portion, the
    // matrix the exported tree is annotated over.
    let routing = route_samples(&tree, &split.train_features)
        .context("failed to route training samples")?;
    let annotated = annotate(&tree, &split.train_labels, &routing);

    let writer = ResultWriter::new(Path::new(".")).context("failed to prepare output directory")?;
    writer
        .write_tree_data(&annotated, &split.test_samples(), &split.train_labels)
        .context("failed to write tree data")?;

    let output = ExportOutput {
        n_train: split.n_train(),
        n_test: split.n_test(),
        n_nodes: tree.n_nodes(),
        tree_depth: tree.depth(),
        n_classes: tree.n_classes(),
        feature_names: dataset.feature_names().to_vec(),
        output_file: writer.tree_data_path().display().to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
