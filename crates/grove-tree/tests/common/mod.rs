//! Shared collaborators for the grove-tree integration tests: a pattern is a
//! column index of a `Vec<f64>` row and its distance is that column's value.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use grove_tree::{ClassSet, Distance, PatternDistance, PatternFactory, TreeError, TreeRng};

/// Picks a uniformly random column and counts its calls.
#[derive(Debug, Default)]
pub struct ColumnFactory {
    calls: AtomicUsize,
}

impl ColumnFactory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PatternFactory<Vec<f64>> for ColumnFactory {
    type Pattern = usize;

    fn create(
        &self,
        data: &[Vec<f64>],
        _class_set: &ClassSet,
        rng: &mut TreeRng,
    ) -> Result<Option<usize>, TreeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let width = data.first().map_or(0, Vec::len);
        Ok((width > 0).then(|| rng.gen_range(0..width)))
    }
}

/// Never produces a pattern.
#[derive(Debug, Default)]
pub struct NoPatterns {
    calls: AtomicUsize,
}

impl NoPatterns {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PatternFactory<Vec<f64>> for NoPatterns {
    type Pattern = usize;

    fn create(
        &self,
        _data: &[Vec<f64>],
        _class_set: &ClassSet,
        _rng: &mut TreeRng,
    ) -> Result<Option<usize>, TreeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }
}

/// Always fails.
#[derive(Debug, Default)]
pub struct Broken;

impl PatternFactory<Vec<f64>> for Broken {
    type Pattern = usize;

    fn create(
        &self,
        _data: &[Vec<f64>],
        _class_set: &ClassSet,
        _rng: &mut TreeRng,
    ) -> Result<Option<usize>, TreeError> {
        Err(TreeError::PatternFactory {
            reason: "broken factory".to_string(),
        })
    }
}

/// The value of the chosen column; `NaN` is undefined.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct ColumnDistance;

impl PatternDistance<Vec<f64>, usize> for ColumnDistance {
    fn compute(&self, example: &Vec<f64>, pattern: &usize) -> Distance {
        match example.get(*pattern) {
            Some(v) if !v.is_nan() => Distance::Value(*v),
            _ => Distance::Missing,
        }
    }
}

/// Generate a deterministic classification dataset.
///
/// The first three columns are informative (class * 3.0 + noise in [0, 0.5]);
/// the rest are pure noise in [0, 0.5]. Rows are assigned round-robin across
/// classes.
pub fn make_classification(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(class);
        let row: Vec<f64> = (0..n_features)
            .map(|f| {
                let base = if f < 3 { class as f64 * 3.0 } else { 0.0 };
                base + rng.gen::<f64>() * 0.5
            })
            .collect();
        data.push(row);
    }
    (data, labels)
}
