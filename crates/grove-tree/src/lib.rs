//! Pattern-based decision trees and bagging ensembles.
//!
//! Trees are induced over weighted [`ClassSet`]s by searching, for each
//! candidate pattern drawn from a pluggable [`PatternFactory`], the distance
//! cutoff that minimizes a weighted impurity [`Criterion`]. Ensembles fit
//! members on bootstrap samples in parallel via rayon and keep an out-of-bag
//! matrix for unbiased error estimation. Patterns are opaque to this crate:
//! they are only ever compared through a [`PatternDistance`].

mod bootstrap;
mod class_set;
mod config;
mod criterion;
mod error;
mod forest;
mod node;
mod oob;
mod pattern;
mod predict;
mod serialize;
mod splitter;
#[cfg(test)]
mod testing;
mod tree;

pub use bootstrap::{Bootstrap, bootstrap};
pub use class_set::{ClassSet, Example, Sample};
pub use config::ForestConfig;
pub use criterion::{Criterion, PatternRanking, f_statistic};
pub use error::TreeError;
pub use forest::{Ensemble, ForestLearner};
pub use node::{Impurity, Node, NodeIndex};
pub use oob::{OobMatrix, OobScore};
pub use pattern::{Distance, PatternDistance, PatternFactory, TreeRng};
pub use predict::{ClassDistribution, Predictor};
pub use splitter::{
    CutoffSearch, Cutoff, MissingPolicy, Observation, Partition, Route, ScoredSplit, Splitter,
    Threshold, find_cutoff,
};
pub use tree::{PatternTree, TreeConfig, TreeLearner};
