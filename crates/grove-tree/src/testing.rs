//! Minimal pattern collaborators for unit tests: a pattern is a column index
//! of a row-major `Vec<f64>` record, and the distance is that column's value.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::class_set::ClassSet;
use crate::error::TreeError;
use crate::pattern::{Distance, PatternDistance, PatternFactory, TreeRng};

/// Picks a uniformly random column.
#[derive(Debug, Default)]
pub(crate) struct ColumnFactory {
    pub(crate) calls: AtomicUsize,
}

impl ColumnFactory {
    pub(crate) fn calls(&self) -> usize {
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
        if width == 0 {
            return Ok(None);
        }
        Ok(Some(rng.gen_range(0..width)))
    }
}

/// Never produces a pattern.
#[derive(Debug, Default)]
pub(crate) struct EmptyFactory {
    pub(crate) calls: AtomicUsize,
}

impl EmptyFactory {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PatternFactory<Vec<f64>> for EmptyFactory {
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

/// Fails once a node holds fewer than `below` examples.
#[derive(Debug)]
pub(crate) struct FailingFactory {
    pub(crate) below: usize,
}

impl PatternFactory<Vec<f64>> for FailingFactory {
    type Pattern = usize;

    fn create(
        &self,
        _data: &[Vec<f64>],
        class_set: &ClassSet,
        _rng: &mut TreeRng,
    ) -> Result<Option<usize>, TreeError> {
        if class_set.n_examples() < self.below {
            return Err(TreeError::PatternFactory {
                reason: format!("node with {} examples", class_set.n_examples()),
            });
        }
        Ok(Some(0))
    }
}

/// The value of the chosen column; `NaN` is undefined.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct ColumnDistance;

impl PatternDistance<Vec<f64>, usize> for ColumnDistance {
    fn compute(&self, example: &Vec<f64>, pattern: &usize) -> Distance {
        let value = example[*pattern];
        if value.is_nan() {
            Distance::Missing
        } else {
            Distance::Value(value)
        }
    }
}

/// Three well-separated classes along column 0; column 1 is constant.
pub(crate) fn separable_data() -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut data = Vec::new();
    let mut labels = Vec::new();
    for class in 0..3 {
        for i in 0..20 {
            data.push(vec![class as f64 * 10.0 + i as f64 * 0.15, 0.5]);
            labels.push(class);
        }
    }
    (data, labels)
}
