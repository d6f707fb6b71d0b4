//! Configuration builder for ensemble training.

use crate::criterion::{Criterion, PatternRanking};
use crate::error::TreeError;
use crate::splitter::MissingPolicy;
use crate::tree::TreeConfig;

/// Configuration for fitting a bagging ensemble of pattern trees.
///
/// Construct via [`ForestConfig::new`], then chain `with_*` methods. Tree
/// settings are forwarded to the [`TreeConfig`] every member is grown with.
///
/// # Defaults
///
/// | Parameter   | Default                                 |
/// |-------------|-----------------------------------------|
/// | `n_members` | 100 (via [`Default`])                   |
/// | `tree`      | [`TreeConfig::new`]                     |
/// | `seed`      | 42                                      |
/// | `n_threads` | `None` (the global rayon pool)          |
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForestConfig {
    pub(crate) n_members: usize,
    pub(crate) tree: TreeConfig,
    pub(crate) seed: u64,
    pub(crate) n_threads: Option<usize>,
}

impl ForestConfig {
    /// Create a new config with the given number of members.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidMemberCount`] if `n_members` is zero.
    pub fn new(n_members: usize) -> Result<Self, TreeError> {
        if n_members == 0 {
            return Err(TreeError::InvalidMemberCount { n_members });
        }
        Ok(Self {
            n_members,
            tree: TreeConfig::new(),
            seed: 42,
            n_threads: None,
        })
    }

    // --- Setters ---

    /// Replace the per-member tree configuration. Its seed is ignored; members
    /// draw their seeds from the ensemble seed.
    #[must_use]
    pub fn with_tree_config(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Set the node weight at or below which a node becomes a leaf.
    #[must_use]
    pub fn with_min_split_weight(mut self, min_split_weight: f64) -> Self {
        self.tree = self.tree.with_min_split_weight(min_split_weight);
        self
    }

    /// Set the maximum tree depth. `None` means unlimited.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.tree = self.tree.with_max_depth(max_depth);
        self
    }

    /// Set the number of candidate patterns sampled per node.
    #[must_use]
    pub fn with_n_candidates(mut self, n_candidates: usize) -> Self {
        self.tree = self.tree.with_n_candidates(n_candidates);
        self
    }

    /// Set the impurity criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.tree = self.tree.with_criterion(criterion);
        self
    }

    /// Set how candidate patterns are ranked.
    #[must_use]
    pub fn with_pattern_ranking(mut self, pattern_ranking: PatternRanking) -> Self {
        self.tree = self.tree.with_pattern_ranking(pattern_ranking);
        self
    }

    /// Set the missing-value routing policy.
    #[must_use]
    pub fn with_missing_policy(mut self, missing_policy: MissingPolicy) -> Self {
        self.tree = self.tree.with_missing_policy(missing_policy);
        self
    }

    /// Set the master seed the member seeds are drawn from.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit on a dedicated pool of `n_threads` workers instead of the global pool.
    #[must_use]
    pub fn with_n_threads(mut self, n_threads: Option<usize>) -> Self {
        self.n_threads = n_threads;
        self
    }

    // --- Getters ---

    /// Return the number of members.
    #[must_use]
    pub fn n_members(&self) -> usize {
        self.n_members
    }

    /// Return the per-member tree configuration.
    #[must_use]
    pub fn tree_config(&self) -> &TreeConfig {
        &self.tree
    }

    /// Return the master seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return the dedicated pool size, if any.
    #[must_use]
    pub fn n_threads(&self) -> Option<usize> {
        self.n_threads
    }

    /// Check every setting, including the tree configuration.
    ///
    /// # Errors
    ///
    /// | Variant                              | When                          |
    /// |--------------------------------------|-------------------------------|
    /// | [`TreeError::InvalidMemberCount`]    | `n_members` is zero           |
    /// | tree configuration errors            | see [`TreeConfig::validate`]  |
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.n_members == 0 {
            return Err(TreeError::InvalidMemberCount {
                n_members: self.n_members,
            });
        }
        self.tree.validate()
    }
}

impl Default for ForestConfig {
    /// 100 members with default tree settings.
    fn default() -> Self {
        Self {
            n_members: 100,
            tree: TreeConfig::new(),
            seed: 42,
            n_threads: None,
        }
    }
}
