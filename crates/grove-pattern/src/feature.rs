//! Raw-feature patterns: a threshold or category test on one attribute of a record.
//!
//! Records are `Vec<f64>` rows. Categorical attributes hold category codes
//! and `NaN` marks a missing value in either kind of attribute.

use rand::Rng;
use tracing::trace;

use grove_tree::{ClassSet, Distance, PatternDistance, PatternFactory, TreeError, TreeRng};

use crate::error::PatternError;

/// How an attribute is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FeatureKind {
    /// Ordered values split by a cutoff.
    Numeric,
    /// Unordered category codes split by equality.
    Categorical,
}

/// A test on one attribute.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FeaturePattern {
    /// The attribute value itself is the distance.
    Numeric {
        /// Zero-based attribute index.
        feature: usize,
    },
    /// The distance is whether the attribute equals `category`.
    Categorical {
        /// Zero-based attribute index.
        feature: usize,
        /// The category code matched against.
        category: f64,
    },
}

impl FeaturePattern {
    /// Return the attribute this pattern tests.
    #[must_use]
    pub fn feature(&self) -> usize {
        match self {
            FeaturePattern::Numeric { feature } | FeaturePattern::Categorical { feature, .. } => {
                *feature
            }
        }
    }
}

/// Draws a uniformly random attribute of a fixed schema.
#[derive(Debug, Clone)]
pub struct RandomFeatureFactory {
    schema: Vec<FeatureKind>,
}

impl RandomFeatureFactory {
    /// Create a factory for records described by `schema`, one kind per attribute.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::EmptySchema`] if `schema` is empty.
    pub fn new(schema: Vec<FeatureKind>) -> Result<Self, PatternError> {
        if schema.is_empty() {
            return Err(PatternError::EmptySchema);
        }
        Ok(Self { schema })
    }

    /// Create a factory for `n_features` numeric attributes.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::EmptySchema`] if `n_features` is zero.
    pub fn numeric(n_features: usize) -> Result<Self, PatternError> {
        Self::new(vec![FeatureKind::Numeric; n_features])
    }

    /// Return the attribute kinds.
    #[must_use]
    pub fn schema(&self) -> &[FeatureKind] {
        &self.schema
    }
}

impl PatternFactory<Vec<f64>> for RandomFeatureFactory {
    type Pattern = FeaturePattern;

    /// Pick an attribute uniformly. Categorical attributes take their category
    /// from a uniformly drawn example at the node that has the attribute.
    ///
    /// Returns `Ok(None)` when no example at the node has the attribute.
    fn create(
        &self,
        data: &[Vec<f64>],
        class_set: &ClassSet,
        rng: &mut TreeRng,
    ) -> Result<Option<FeaturePattern>, TreeError> {
        for (_, example) in class_set.iter() {
            let got = data[example.index()].len();
            if got != self.schema.len() {
                return Err(PatternError::SchemaMismatch {
                    expected: self.schema.len(),
                    got,
                    example_index: example.index(),
                }
                .into());
            }
        }

        let feature = rng.gen_range(0..self.schema.len());
        let observed: Vec<f64> = class_set
            .iter()
            .map(|(_, example)| data[example.index()][feature])
            .filter(|v| !v.is_nan())
            .collect();
        if observed.is_empty() {
            trace!(feature, "attribute missing for every example at the node");
            return Ok(None);
        }

        let pattern = match self.schema[feature] {
            FeatureKind::Numeric => FeaturePattern::Numeric { feature },
            FeatureKind::Categorical => FeaturePattern::Categorical {
                feature,
                category: observed[rng.gen_range(0..observed.len())],
            },
        };
        Ok(Some(pattern))
    }
}

/// Distance from a record to a [`FeaturePattern`].
///
/// Numeric patterns yield the attribute value; categorical patterns yield a
/// match flag. A `NaN` or absent attribute is undefined.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct FeatureDistance;

impl PatternDistance<Vec<f64>, FeaturePattern> for FeatureDistance {
    fn compute(&self, example: &Vec<f64>, pattern: &FeaturePattern) -> Distance {
        let value = match example.get(pattern.feature()) {
            Some(&v) if !v.is_nan() => v,
            _ => return Distance::Missing,
        };
        match pattern {
            FeaturePattern::Numeric { .. } => Distance::Value(value),
            FeaturePattern::Categorical { category, .. } => Distance::Match(value == *category),
        }
    }
}
