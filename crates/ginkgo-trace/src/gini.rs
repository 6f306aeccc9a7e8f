//! Gini impurity with a step-by-step textual derivation.

/// Compute the Gini impurity of a class-count histogram along with a
/// derivation string showing the arithmetic.
///
/// The derivation has three segments: the symbolic formula over raw counts,
/// the same formula with each ratio evaluated to 3 decimal places, and the
/// final value rounded to 3 decimal places, e.g. for counts `[3, 1]`:
///
/// ```text
/// 1 - ((3/4)^2 + (1/4)^2) = 1 - (0.750^2 + 0.250^2) = 0.375
/// ```
///
/// A zero-total histogram yields `(0.0, "0")`: a node with no routed
/// samples is still formattable, and no division is attempted.
///
/// Counts are non-negative by construction (`usize`); callers supply one
/// entry per class.
#[must_use]
pub fn gini_breakdown(class_counts: &[usize]) -> (f64, String) {
    let total: usize = class_counts.iter().sum();
    if total == 0 {
        return (0.0, "0".to_string());
    }

    let n = total as f64;
    let ratios: Vec<f64> = class_counts.iter().map(|&c| c as f64 / n).collect();
    let gini = 1.0 - ratios.iter().map(|p| p * p).sum::<f64>();

    let symbolic: Vec<String> = class_counts
        .iter()
        .map(|c| format!("({c}/{total})^2"))
        .collect();
    let numeric: Vec<String> = ratios.iter().map(|p| format!("{p:.3}^2")).collect();
    let derivation = format!(
        "1 - ({}) = 1 - ({}) = {gini:.3}",
        symbolic.join(" + "),
        numeric.join(" + "),
    );

    (gini, derivation)
}
