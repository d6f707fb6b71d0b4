//! Shapelet patterns: z-normalized subsequences matched anywhere in a series.

use rand::Rng;
use tracing::trace;

use grove_tree::{ClassSet, Distance, PatternDistance, PatternFactory, TreeError, TreeRng};

use crate::error::PatternError;
use crate::preprocess::{is_constant, mean_std, z_normalize};
use crate::series::TimeSeries;

/// A z-normalized subsequence.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shapelet(Vec<f64>);

impl Shapelet {
    /// Z-normalize `window` into a shapelet.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`PatternError::EmptySeries`] | `window` is empty |
    /// | [`PatternError::ConstantSeries`] | `window` has zero variance |
    pub fn from_window(window: &[f64]) -> Result<Self, PatternError> {
        z_normalize(window).map(Self)
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a shapelet built by [`Shapelet::from_window`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the normalized values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Draws shapelets from random windows of the series at a node.
#[derive(Debug, Clone)]
pub struct RandomShapeletFactory {
    min_length: usize,
    max_length: usize,
}

impl RandomShapeletFactory {
    /// Create a factory drawing window lengths uniformly from `min_length..=max_length`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidShapeletLength`] if `min_length` is zero
    /// or greater than `max_length`.
    pub fn new(min_length: usize, max_length: usize) -> Result<Self, PatternError> {
        if min_length == 0 || min_length > max_length {
            return Err(PatternError::InvalidShapeletLength {
                min_length,
                max_length,
            });
        }
        Ok(Self {
            min_length,
            max_length,
        })
    }

    /// Return the shortest window length.
    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Return the longest window length.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl PatternFactory<TimeSeries> for RandomShapeletFactory {
    type Pattern = Shapelet;

    /// Pick a random example at the node, then a random length and offset.
    ///
    /// Returns `Ok(None)` when the drawn series is shorter than `min_length`
    /// or the drawn window is constant.
    fn create(
        &self,
        data: &[TimeSeries],
        class_set: &ClassSet,
        rng: &mut TreeRng,
    ) -> Result<Option<Shapelet>, TreeError> {
        let n_examples = class_set.n_examples();
        if n_examples == 0 {
            return Ok(None);
        }
        let Some((_, example)) = class_set.iter().nth(rng.gen_range(0..n_examples)) else {
            return Ok(None);
        };
        let series = &data[example.index()];
        if series.len() < self.min_length {
            trace!(len = series.len(), "series shorter than the shortest shapelet");
            return Ok(None);
        }

        let length = rng.gen_range(self.min_length..=self.max_length.min(series.len()));
        let start = rng.gen_range(0..=series.len() - length);
        let Some(window) = series.window(start, length) else {
            return Ok(None);
        };
        match Shapelet::from_window(window) {
            Ok(shapelet) => Ok(Some(shapelet)),
            Err(PatternError::ConstantSeries { .. }) => {
                trace!(start, length, "constant window");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Minimum Euclidean distance between `shapelet` and every z-normalized
/// window of `series` of the same length.
///
/// Each window's running sum is abandoned once it reaches the best distance
/// found so far. Constant windows normalize to all zeros. Returns `None` when
/// the series is shorter than the shapelet.
#[must_use]
pub fn shapelet_distance(series: &[f64], shapelet: &[f64]) -> Option<f64> {
    let m = shapelet.len();
    if m == 0 || m > series.len() {
        return None;
    }

    let mut best_sq = f64::INFINITY;
    for window in series.windows(m) {
        let (mean, std) = mean_std(window);
        let constant = is_constant(mean, std);
        let mut sum_sq = 0.0;
        for (&x, &s) in window.iter().zip(shapelet) {
            let z = if constant { 0.0 } else { (x - mean) / std };
            sum_sq += (z - s) * (z - s);
            if sum_sq >= best_sq {
                break;
            }
        }
        if sum_sq < best_sq {
            best_sq = sum_sq;
        }
    }
    Some(best_sq.sqrt())
}

/// Distance from a series to a [`Shapelet`]; see [`shapelet_distance`].
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct ShapeletDistance;

impl PatternDistance<TimeSeries, Shapelet> for ShapeletDistance {
    fn compute(&self, example: &TimeSeries, pattern: &Shapelet) -> Distance {
        shapelet_distance(example.as_slice(), pattern.as_slice())
            .map_or(Distance::Missing, Distance::Value)
    }
}
