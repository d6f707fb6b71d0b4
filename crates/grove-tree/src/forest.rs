//! Bagging ensembles of pattern trees with parallel member fitting.

use rand::{Rng, SeedableRng};
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument};

use crate::bootstrap::bootstrap;
use crate::class_set::ClassSet;
use crate::config::ForestConfig;
use crate::error::TreeError;
use crate::oob::OobMatrix;
use crate::pattern::{PatternDistance, PatternFactory, TreeRng};
use crate::splitter::Splitter;
use crate::tree::{PatternTree, TreeConfig, grow, label_domain};

/// A fitted bagging ensemble.
///
/// Every member shares the same label domain. The OOB matrix records, for
/// each training example and member, whether the example was left out of
/// that member's bootstrap sample.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Ensemble<P, D> {
    pub(crate) members: Vec<PatternTree<P, D>>,
    pub(crate) oob: OobMatrix,
    pub(crate) n_labels: usize,
}

impl<P, D> Ensemble<P, D> {
    /// Return the fitted members, in seed order.
    #[must_use]
    pub fn members(&self) -> &[PatternTree<P, D>] {
        &self.members
    }

    /// Return the number of members.
    #[must_use]
    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    /// Return the out-of-bag matrix.
    #[must_use]
    pub fn oob(&self) -> &OobMatrix {
        &self.oob
    }
}

/// Fits [`Ensemble`]s with an injected pattern factory and distance.
#[derive(Debug, Clone)]
pub struct ForestLearner<F, D> {
    config: ForestConfig,
    factory: F,
    distance: D,
}

impl<F, D> ForestLearner<F, D> {
    /// Create a learner from its configuration and pattern collaborators.
    #[must_use]
    pub fn new(config: ForestConfig, factory: F, distance: D) -> Self {
        Self {
            config,
            factory,
            distance,
        }
    }

    /// Return the configuration.
    #[must_use]
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Return the pattern factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Fit the ensemble.
    ///
    /// Each member draws a bootstrap sample of the full training set and grows
    /// one tree on it. Members run in parallel, each with its own RNG seeded
    /// from the master seed, so the result does not depend on scheduling.
    /// The first member error aborts the fit; no partial ensemble is returned.
    ///
    /// # Errors
    ///
    /// | Variant                            | When                                  |
    /// |------------------------------------|---------------------------------------|
    /// | configuration errors               | see [`ForestConfig::validate`]        |
    /// | [`TreeError::LengthMismatch`]      | `data` and `labels` differ in length  |
    /// | [`TreeError::EmptyDataset`]        | no examples                           |
    /// | [`TreeError::ThreadPool`]          | the dedicated pool cannot be built    |
    /// | [`TreeError::MemberFit`]           | fitting any member fails              |
    #[instrument(skip_all, fields(n_members = self.config.n_members, n_examples = data.len()))]
    pub fn fit<X>(&self, data: &[X], labels: &[usize]) -> Result<Ensemble<F::Pattern, D>, TreeError>
    where
        X: Sync,
        F: PatternFactory<X>,
        D: PatternDistance<X, F::Pattern> + Clone + Send,
    {
        self.config.validate()?;
        let n_labels = label_domain(data, labels)?;
        let root = ClassSet::from_labels(labels, n_labels)?;

        info!(
            n_members = self.config.n_members,
            n_examples = data.len(),
            n_labels,
            "fitting ensemble"
        );

        // Per-member seeds from the master RNG, drawn before any work is scheduled.
        let mut master_rng = TreeRng::seed_from_u64(self.config.seed);
        let seeds: Vec<u64> = (0..self.config.n_members)
            .map(|_| master_rng.gen())
            .collect();

        let splitter = self.config.tree.splitter(&self.factory, &self.distance);
        let job = || fit_members(&splitter, &self.config.tree, data, &root, seeds);
        let fitted = match self.config.n_threads {
            Some(n_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .map_err(|source| TreeError::ThreadPool { source })?
                .install(job),
            None => job(),
        }?;

        let mut members = Vec::with_capacity(fitted.len());
        let mut columns = Vec::with_capacity(fitted.len());
        for (tree, column) in fitted {
            members.push(tree);
            columns.push(column);
        }
        let oob = OobMatrix::from_columns(data.len(), &columns);

        info!(
            n_members = members.len(),
            oob_fraction = oob.true_fraction(),
            "ensemble fit complete"
        );

        Ok(Ensemble {
            members,
            oob,
            n_labels,
        })
    }
}

/// Fit one member per seed; members come back in seed order with their OOB columns.
fn fit_members<X, F, D>(
    splitter: &Splitter<'_, F, D>,
    tree_config: &TreeConfig,
    data: &[X],
    root: &ClassSet,
    seeds: Vec<u64>,
) -> Result<Vec<(PatternTree<F::Pattern, D>, Vec<bool>)>, TreeError>
where
    X: Sync,
    F: PatternFactory<X>,
    D: PatternDistance<X, F::Pattern> + Clone + Send,
{
    seeds
        .into_par_iter()
        .enumerate()
        .map(|(member, seed)| {
            let mut rng = TreeRng::seed_from_u64(seed);
            let sample = bootstrap(root, data.len(), &mut rng);
            let tree = grow(splitter, tree_config, data, &sample.in_bag, &mut rng).map_err(
                |source| TreeError::MemberFit {
                    member,
                    source: Box::new(source),
                },
            )?;
            debug!(member, n_nodes = tree.n_nodes(), "member fitted");
            Ok((tree, sample.out_of_bag))
        })
        .collect()
}
