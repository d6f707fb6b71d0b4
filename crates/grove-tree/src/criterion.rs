//! Impurity criteria for scoring two-way splits and ranking candidate patterns.

/// Criterion for measuring the impurity of a weighted class distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Criterion {
    /// Information entropy in bits: -Σ(p_i · log2(p_i))
    #[default]
    Entropy,
    /// Gini impurity: 1 - Σ(p_i²)
    Gini,
}

impl Criterion {
    /// Compute the impurity of a node from its per-label weights.
    ///
    /// Returns `0.0` when `total` is not positive.
    #[must_use]
    pub fn impurity(&self, class_weights: &[f64], total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        match self {
            Criterion::Entropy => -class_weights
                .iter()
                .filter(|&&w| w > 0.0)
                .map(|&w| {
                    let p = w / total;
                    p * p.log2()
                })
                .sum::<f64>(),
            Criterion::Gini => {
                let sum_sq: f64 = class_weights
                    .iter()
                    .map(|&w| {
                        let p = w / total;
                        p * p
                    })
                    .sum();
                1.0 - sum_sq
            }
        }
    }

    /// Impurity of a two-way split: each side's impurity weighted by its share of the total weight.
    #[must_use]
    pub fn split_impurity(
        &self,
        left: &[f64],
        left_weight: f64,
        right: &[f64],
        right_weight: f64,
    ) -> f64 {
        let total = left_weight + right_weight;
        if total <= 0.0 {
            return 0.0;
        }
        (left_weight / total) * self.impurity(left, left_weight)
            + (right_weight / total) * self.impurity(right, right_weight)
    }
}

/// How the builder chooses among the candidate patterns sampled at a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PatternRanking {
    /// Run the threshold search on every candidate and keep the lowest split impurity.
    #[default]
    Impurity,
    /// Keep the candidate whose distances have the largest one-way ANOVA
    /// F-statistic across labels, then run the threshold search on it alone.
    FStatistic,
}

/// Weighted one-way ANOVA F-statistic of `(value, label, weight)` observations.
///
/// Ratio of the between-label mean square to the within-label mean square.
/// Returns `0.0` when fewer than two labels are present, and `f64::INFINITY`
/// when the labels are perfectly separated (zero within-label spread) but
/// their means differ.
#[must_use]
pub fn f_statistic(observations: &[(f64, usize, f64)], n_labels: usize) -> f64 {
    let mut sums = vec![0.0f64; n_labels];
    let mut weights = vec![0.0f64; n_labels];
    for &(value, label, weight) in observations {
        sums[label] += weight * value;
        weights[label] += weight;
    }

    let total_weight: f64 = weights.iter().sum();
    let n_groups = weights.iter().filter(|&&w| w > 0.0).count();
    if n_groups < 2 || total_weight <= 0.0 {
        return 0.0;
    }

    let grand_mean = sums.iter().sum::<f64>() / total_weight;
    let means: Vec<f64> = sums
        .iter()
        .zip(&weights)
        .map(|(&s, &w)| if w > 0.0 { s / w } else { 0.0 })
        .collect();

    let between: f64 = weights
        .iter()
        .zip(&means)
        .map(|(&w, &m)| w * (m - grand_mean).powi(2))
        .sum();
    let within: f64 = observations
        .iter()
        .map(|&(value, label, weight)| weight * (value - means[label]).powi(2))
        .sum();

    let df_between = (n_groups - 1) as f64;
    let df_within = total_weight - n_groups as f64;
    if within <= 0.0 || df_within <= 0.0 {
        return if between > 0.0 { f64::INFINITY } else { 0.0 };
    }
    (between / df_between) / (within / df_within)
}
