//! Probability estimates and the prediction interface shared by trees and ensembles.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::forest::Ensemble;
use crate::pattern::PatternDistance;

/// Class probability distribution from a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    probs: Vec<f64>,
}

impl ClassDistribution {
    /// Create a new class distribution.
    pub(crate) fn new(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    /// Return the predicted class (argmax of probabilities; the lowest label wins ties).
    #[must_use]
    pub fn predicted_class(&self) -> usize {
        let mut best = 0;
        for (label, &p) in self.probs.iter().enumerate() {
            if p > self.probs[best] {
                best = label;
            }
        }
        best
    }

    /// Return the top-k classes sorted by descending probability.
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut indexed: Vec<(usize, f64)> = self.probs.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(k);
        indexed
    }

    /// Return the probability of `label`, or 0 outside the domain.
    #[must_use]
    pub fn probability(&self, label: usize) -> f64 {
        self.probs.get(label).copied().unwrap_or(0.0)
    }

    /// Return the probability distribution as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Consume the distribution and return the probability vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.probs
    }
}

/// A fitted classifier over feature records of type `X`.
pub trait Predictor<X> {
    /// Return the size of the label domain.
    fn n_labels(&self) -> usize;

    /// Return the probability of every label for `example`; the components sum to 1.
    fn estimate(&self, example: &X) -> ClassDistribution;

    /// Return the most probable label for `example`.
    fn predict(&self, example: &X) -> usize {
        self.estimate(example).predicted_class()
    }
}

impl<P, D> Ensemble<P, D> {
    /// Return probability distributions for a batch of examples in parallel.
    pub fn estimate_batch<X>(&self, data: &[X]) -> Vec<ClassDistribution>
    where
        X: Sync,
        P: Sync,
        D: PatternDistance<X, P>,
    {
        data.par_iter().map(|example| self.estimate(example)).collect()
    }

    /// Predict labels for a batch of examples in parallel.
    pub fn predict_batch<X>(&self, data: &[X]) -> Vec<usize>
    where
        X: Sync,
        P: Sync,
        D: PatternDistance<X, P>,
    {
        data.par_iter().map(|example| self.predict(example)).collect()
    }
}

impl<X, P, D> Predictor<X> for Ensemble<P, D>
where
    D: PatternDistance<X, P>,
{
    fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Average the members' leaf probabilities with equal weight.
    fn estimate(&self, example: &X) -> ClassDistribution {
        let mut avg = vec![0.0f64; self.n_labels];
        for member in &self.members {
            for (a, p) in avg.iter_mut().zip(member.visit(example)) {
                *a += p;
            }
        }
        let n = self.members.len() as f64;
        avg.iter_mut().for_each(|v| *v /= n);
        ClassDistribution::new(avg)
    }
}
