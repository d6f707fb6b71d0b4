//! Reference pattern families for grove-tree.
//!
//! Two families implement [`grove_tree::PatternFactory`] and
//! [`grove_tree::PatternDistance`]:
//!
//! - raw features: a cutoff on a numeric attribute or an equality test on a
//!   categorical one, over `Vec<f64>` records with `NaN` as missing;
//! - shapelets: the minimum z-normalized Euclidean distance between a short
//!   subsequence and every window of a [`TimeSeries`].

mod error;
mod feature;
mod preprocess;
mod series;
mod shapelet;

pub use error::PatternError;
pub use feature::{FeatureDistance, FeatureKind, FeaturePattern, RandomFeatureFactory};
pub use preprocess::{is_constant, mean_std, z_normalize};
pub use series::TimeSeries;
pub use shapelet::{RandomShapeletFactory, Shapelet, ShapeletDistance, shapelet_distance};
