//! Contracts for the pluggable pattern collaborators.

use std::fmt;

use rand_chacha::ChaCha8Rng;

use crate::class_set::ClassSet;
use crate::error::TreeError;

/// RNG threaded explicitly through every randomized step of tree induction.
pub type TreeRng = ChaCha8Rng;

/// Distance from an example to a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// A numeric distance; split on a cutoff value.
    Value(f64),
    /// A categorical pattern: `true` when the example equals the pattern.
    Match(bool),
    /// The distance is undefined for this example (e.g. a missing attribute).
    Missing,
}

impl Distance {
    /// Return `true` if the distance is undefined. A `NaN` value counts as undefined.
    #[must_use]
    pub fn is_missing(self) -> bool {
        match self {
            Distance::Missing => true,
            Distance::Value(v) => v.is_nan(),
            Distance::Match(_) => false,
        }
    }
}

/// Produces candidate patterns for the examples at a tree node.
///
/// `X` is the feature record type of the training data.
pub trait PatternFactory<X>: Sync {
    /// The pattern type produced.
    type Pattern: Clone + fmt::Debug + Send + Sync;

    /// Sample one candidate pattern for the examples in `class_set`.
    ///
    /// `Ok(None)` means this attempt produced nothing usable (the node may
    /// still get other attempts); it is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PatternFactory`] when the factory cannot work
    /// with the data at all. This aborts the tree fit.
    fn create(
        &self,
        data: &[X],
        class_set: &ClassSet,
        rng: &mut TreeRng,
    ) -> Result<Option<Self::Pattern>, TreeError>;
}

/// Measures the distance between an example and a pattern.
pub trait PatternDistance<X, P>: Sync {
    /// Compute the distance from `example` to `pattern`.
    fn compute(&self, example: &X, pattern: &P) -> Distance;
}
