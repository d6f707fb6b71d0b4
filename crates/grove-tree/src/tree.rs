use rand::SeedableRng;
use tracing::{debug, instrument, trace};

use crate::{
    TreeError,
    class_set::ClassSet,
    criterion::{Criterion, PatternRanking},
    node::{Impurity, Node, NodeIndex},
    pattern::{PatternDistance, PatternFactory, TreeRng},
    predict::{ClassDistribution, Predictor},
    splitter::{MissingPolicy, Route, Splitter},
};

/// Configuration for inducing a single pattern tree.
///
/// Construct via [`TreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter          | Default             |
/// |--------------------|---------------------|
/// | `min_split_weight` | 1.0                 |
/// | `max_depth`        | `None` (unlimited)  |
/// | `n_candidates`     | 10                  |
/// | `criterion`        | `Entropy`           |
/// | `pattern_ranking`  | `Impurity`          |
/// | `missing_policy`   | `Separate`          |
/// | `seed`             | 42                  |
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeConfig {
    pub(crate) min_split_weight: f64,
    pub(crate) max_depth: Option<usize>,
    pub(crate) n_candidates: usize,
    pub(crate) criterion: Criterion,
    pub(crate) pattern_ranking: PatternRanking,
    pub(crate) missing_policy: MissingPolicy,
    pub(crate) seed: u64,
}

impl TreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_split_weight: 1.0,
            max_depth: None,
            n_candidates: 10,
            criterion: Criterion::Entropy,
            pattern_ranking: PatternRanking::Impurity,
            missing_policy: MissingPolicy::Separate,
            seed: 42,
        }
    }

    /// Set the node weight at or below which a node becomes a leaf.
    #[must_use]
    pub fn with_min_split_weight(mut self, min_split_weight: f64) -> Self {
        self.min_split_weight = min_split_weight;
        self
    }

    /// Set the maximum tree depth. `None` means unlimited; the root is depth 0.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the number of candidate patterns sampled per node.
    #[must_use]
    pub fn with_n_candidates(mut self, n_candidates: usize) -> Self {
        self.n_candidates = n_candidates;
        self
    }

    /// Set the impurity criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set how candidate patterns are ranked.
    #[must_use]
    pub fn with_pattern_ranking(mut self, pattern_ranking: PatternRanking) -> Self {
        self.pattern_ranking = pattern_ranking;
        self
    }

    /// Set the missing-value routing policy.
    #[must_use]
    pub fn with_missing_policy(mut self, missing_policy: MissingPolicy) -> Self {
        self.missing_policy = missing_policy;
        self
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    // --- Getters ---

    /// Return the minimum weight a node needs to be split.
    #[must_use]
    pub fn min_split_weight(&self) -> f64 {
        self.min_split_weight
    }

    /// Return the maximum depth limit, if any.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Return the number of candidate patterns per node.
    #[must_use]
    pub fn n_candidates(&self) -> usize {
        self.n_candidates
    }

    /// Return the impurity criterion.
    #[must_use]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Return the pattern ranking.
    #[must_use]
    pub fn pattern_ranking(&self) -> PatternRanking {
        self.pattern_ranking
    }

    /// Return the missing-value routing policy.
    #[must_use]
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing_policy
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Check every setting.
    ///
    /// # Errors
    ///
    /// | Variant                             | When                                     |
    /// |-------------------------------------|------------------------------------------|
    /// | [`TreeError::InvalidCandidateCount`] | `n_candidates` is zero                  |
    /// | [`TreeError::InvalidMaxDepth`]       | `max_depth` is `Some(0)`                |
    /// | [`TreeError::InvalidMinSplitWeight`] | `min_split_weight` negative or non-finite |
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.n_candidates == 0 {
            return Err(TreeError::InvalidCandidateCount {
                n_candidates: self.n_candidates,
            });
        }
        if self.max_depth == Some(0) {
            return Err(TreeError::InvalidMaxDepth { max_depth: 0 });
        }
        if !self.min_split_weight.is_finite() || self.min_split_weight < 0.0 {
            return Err(TreeError::InvalidMinSplitWeight {
                min_split_weight: self.min_split_weight,
            });
        }
        Ok(())
    }

    /// Build the splitter these settings describe.
    pub(crate) fn splitter<'a, F, D>(&self, factory: &'a F, distance: &'a D) -> Splitter<'a, F, D> {
        Splitter::new(factory, distance)
            .with_criterion(self.criterion)
            .with_pattern_ranking(self.pattern_ranking)
            .with_missing_policy(self.missing_policy)
            .with_n_candidates(self.n_candidates)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `data` and `labels` line up and return the size of the label domain.
pub(crate) fn label_domain<X>(data: &[X], labels: &[usize]) -> Result<usize, TreeError> {
    if data.len() != labels.len() {
        return Err(TreeError::LengthMismatch {
            n_examples: data.len(),
            n_labels: labels.len(),
        });
    }
    match labels.iter().max() {
        Some(&max) => Ok(max + 1),
        None => Err(TreeError::EmptyDataset),
    }
}

/// Fits single pattern trees with an injected pattern factory and distance.
#[derive(Debug, Clone)]
pub struct TreeLearner<F, D> {
    config: TreeConfig,
    factory: F,
    distance: D,
}

impl<F, D> TreeLearner<F, D> {
    /// Create a learner from its configuration and pattern collaborators.
    #[must_use]
    pub fn new(config: TreeConfig, factory: F, distance: D) -> Self {
        Self {
            config,
            factory,
            distance,
        }
    }

    /// Return the configuration.
    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Return the pattern factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Fit one tree on every example with weight 1.
    ///
    /// # Errors
    ///
    /// | Variant                         | When                                   |
    /// |---------------------------------|----------------------------------------|
    /// | [`TreeError::LengthMismatch`]   | `data` and `labels` differ in length   |
    /// | [`TreeError::EmptyDataset`]     | no examples                            |
    /// | configuration errors            | see [`TreeConfig::validate`]           |
    /// | [`TreeError::PatternFactory`]   | the factory fails                      |
    #[instrument(skip_all, fields(n_examples = data.len()))]
    pub fn fit<X>(
        &self,
        data: &[X],
        labels: &[usize],
    ) -> Result<PatternTree<F::Pattern, D>, TreeError>
    where
        F: PatternFactory<X>,
        D: PatternDistance<X, F::Pattern> + Clone,
    {
        self.config.validate()?;
        let n_labels = label_domain(data, labels)?;
        let root = ClassSet::from_labels(labels, n_labels)?;
        let splitter = self.config.splitter(&self.factory, &self.distance);
        let mut rng = TreeRng::seed_from_u64(self.config.seed);
        grow(&splitter, &self.config, data, &root, &mut rng)
    }
}

/// Induce one tree over `root`, which may be a weighted bootstrap sample.
pub(crate) fn grow<X, F, D>(
    splitter: &Splitter<'_, F, D>,
    config: &TreeConfig,
    data: &[X],
    root: &ClassSet,
    rng: &mut TreeRng,
) -> Result<PatternTree<F::Pattern, D>, TreeError>
where
    F: PatternFactory<X>,
    D: PatternDistance<X, F::Pattern> + Clone,
{
    let mut builder = TreeBuilder {
        splitter,
        config,
        data,
        root_weight: root.total_weight(),
        arena: Vec::new(),
    };
    builder.build(root.clone(), rng)?;

    let tree = PatternTree {
        nodes: builder.arena,
        n_labels: root.n_labels(),
        distance: splitter.distance().clone(),
    };
    debug!(
        n_nodes = tree.n_nodes(),
        n_leaves = tree.n_leaves(),
        depth = tree.depth(),
        "pattern tree built"
    );
    Ok(tree)
}

/// A node still to be induced, and the arena slot reserved for it.
struct Pending {
    class_set: ClassSet,
    depth: usize,
    slot: usize,
}

/// Induction state for one tree.
///
/// Nodes are grown from an explicit work stack, so tree depth is not bounded
/// by the thread stack.
struct TreeBuilder<'s, 'a, X, F: PatternFactory<X>, D> {
    splitter: &'s Splitter<'a, F, D>,
    config: &'s TreeConfig,
    data: &'s [X],
    root_weight: f64,
    arena: Vec<Node<F::Pattern>>,
}

impl<X, F, D> TreeBuilder<'_, '_, X, F, D>
where
    F: PatternFactory<X>,
    D: PatternDistance<X, F::Pattern>,
{
    /// Grow the tree for `root` into the arena; the root lands at index 0.
    fn build(&mut self, root: ClassSet, rng: &mut TreeRng) -> Result<(), TreeError> {
        let mut stack = vec![Pending {
            class_set: root,
            depth: 0,
            slot: self.reserve(),
        }];

        while let Some(Pending {
            class_set,
            depth,
            slot,
        }) = stack.pop()
        {
            let weight = class_set.total_weight();

            // Stopping conditions → leaf.
            let too_light = weight <= self.config.min_split_weight;
            let pure = class_set.n_distinct_labels() <= 1;
            let depth_exceeded = self.config.max_depth.is_some_and(|max_d| depth >= max_d);
            if too_light || pure || depth_exceeded {
                self.arena[slot] = self.leaf(&class_set);
                continue;
            }

            let Some(split) = self.splitter.best_split(self.data, &class_set, rng)? else {
                trace!(depth, weight, "no candidate splits the node");
                self.arena[slot] = self.leaf(&class_set);
                continue;
            };

            let partition = self.splitter.partition(&class_set, &split, rng);
            if partition.n_non_empty() <= 1 {
                self.arena[slot] = self.leaf(&class_set);
                continue;
            }

            let (left, left_queued) = self.side(partition.left, &class_set, depth, &mut stack);
            let (right, right_queued) = self.side(partition.right, &class_set, depth, &mut stack);
            let missing = if partition.missing.is_empty() {
                None
            } else {
                let missing_slot = self.reserve();
                stack.push(Pending {
                    class_set: partition.missing,
                    depth: depth + 1,
                    slot: missing_slot,
                });
                Some(NodeIndex::new(missing_slot))
            };
            // Pop order: left subtree, then right, then missing.
            let n_children =
                usize::from(left_queued) + usize::from(right_queued) + usize::from(missing.is_some());
            let first_child = stack.len() - n_children;
            stack[first_child..].reverse();

            self.arena[slot] = Node::Branch {
                impurity: Impurity::new(split.impurity()),
                threshold: split.into_threshold(),
                left,
                right,
                missing,
                class_distribution: class_set.class_weights(),
                weight: weight / self.root_weight,
            };
        }
        Ok(())
    }

    /// Reserve the slot for a left or right child and queue it.
    ///
    /// An empty side is filled at once with a zero-weight leaf holding the
    /// parent's distribution. The flag is `true` when a child was queued.
    fn side(
        &mut self,
        side: ClassSet,
        parent: &ClassSet,
        depth: usize,
        stack: &mut Vec<Pending>,
    ) -> (NodeIndex, bool) {
        let slot = self.reserve();
        if side.is_empty() {
            let mut leaf = self.leaf(parent);
            if let Node::Leaf { weight, .. } = &mut leaf {
                *weight = 0.0;
            }
            self.arena[slot] = leaf;
            return (NodeIndex::new(slot), false);
        }
        stack.push(Pending {
            class_set: side,
            depth: depth + 1,
            slot,
        });
        (NodeIndex::new(slot), true)
    }

    /// Push a placeholder and return its index; it is overwritten once its node is built.
    fn reserve(&mut self) -> usize {
        self.arena.push(Node::Leaf {
            probabilities: Vec::new(),
            weight: 0.0,
        });
        self.arena.len() - 1
    }

    fn leaf(&self, class_set: &ClassSet) -> Node<F::Pattern> {
        Node::Leaf {
            probabilities: class_set.probabilities(),
            weight: class_set.total_weight() / self.root_weight,
        }
    }
}

/// A fitted pattern tree, bound to the distance it was induced with.
///
/// Stored as an arena-based `Vec<Node>` with index references.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PatternTree<P, D> {
    pub(crate) nodes: Vec<Node<P>>,
    pub(crate) n_labels: usize,
    pub(crate) distance: D,
}

impl<P, D> PatternTree<P, D> {
    /// Return the leaf probability vector reached by `example`.
    ///
    /// At a branch, an undefined distance follows the missing child when
    /// there is one and the right child otherwise; a defined distance goes
    /// left when it is `<=` the cutoff (or matches, for categorical
    /// patterns) and right otherwise.
    pub fn visit<X>(&self, example: &X) -> &[f64]
    where
        D: PatternDistance<X, P>,
    {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { probabilities, .. } => return probabilities,
                Node::Branch {
                    threshold,
                    left,
                    right,
                    missing,
                    ..
                } => {
                    let distance = self.distance.compute(example, threshold.pattern());
                    idx = match threshold.route(distance) {
                        Route::Left => left.index(),
                        Route::Right => right.index(),
                        Route::Missing => missing.unwrap_or(*right).index(),
                    };
                }
            }
        }
    }

    /// Return the nodes; the root is at index 0.
    #[must_use]
    pub fn nodes(&self) -> &[Node<P>] {
        &self.nodes
    }

    /// Return the size of the label domain.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Return the distance the tree routes examples with.
    #[must_use]
    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// Return the total number of nodes in the tree (both branches and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        // BFS: (node_index, current_depth)
        let mut max_depth = 0usize;
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((0usize, 0usize));

        while let Some((node_idx, d)) = queue.pop_front() {
            match &self.nodes[node_idx] {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Branch {
                    left, right, missing, ..
                } => {
                    queue.push_back((left.index(), d + 1));
                    queue.push_back((right.index(), d + 1));
                    if let Some(m) = missing {
                        queue.push_back((m.index(), d + 1));
                    }
                }
            }
        }

        max_depth
    }
}

impl<X, P, D> Predictor<X> for PatternTree<P, D>
where
    D: PatternDistance<X, P>,
{
    fn n_labels(&self) -> usize {
        self.n_labels
    }

    fn estimate(&self, example: &X) -> ClassDistribution {
        ClassDistribution::new(self.visit(example).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Distance;
    use crate::testing::{
        ColumnDistance, ColumnFactory, EmptyFactory, FailingFactory, separable_data,
    };

    fn learner<F>(factory: F) -> TreeLearner<F, ColumnDistance> {
        TreeLearner::new(TreeConfig::new(), factory, ColumnDistance)
    }

    #[test]
    fn empty_dataset_error() {
        let err = learner(ColumnFactory::default())
            .fit::<Vec<f64>>(&[], &[])
            .unwrap_err();
        assert!(matches!(err, TreeError::EmptyDataset));
    }

    #[test]
    fn length_mismatch_error() {
        let err = learner(ColumnFactory::default())
            .fit(&[vec![1.0], vec![2.0]], &[0])
            .unwrap_err();
        assert!(matches!(
            err,
            TreeError::LengthMismatch { n_examples: 2, n_labels: 1 }
        ));
    }

    #[test]
    fn invalid_config_errors() {
        let data = vec![vec![1.0], vec![2.0]];
        let labels = vec![0, 1];
        let zero_candidates = TreeLearner::new(
            TreeConfig::new().with_n_candidates(0),
            ColumnFactory::default(),
            ColumnDistance,
        );
        assert!(matches!(
            zero_candidates.fit(&data, &labels).unwrap_err(),
            TreeError::InvalidCandidateCount { .. }
        ));
        let zero_depth = TreeLearner::new(
            TreeConfig::new().with_max_depth(Some(0)),
            ColumnFactory::default(),
            ColumnDistance,
        );
        assert!(matches!(
            zero_depth.fit(&data, &labels).unwrap_err(),
            TreeError::InvalidMaxDepth { .. }
        ));
        let negative = TreeLearner::new(
            TreeConfig::new().with_min_split_weight(-1.0),
            ColumnFactory::default(),
            ColumnDistance,
        );
        assert!(matches!(
            negative.fit(&data, &labels).unwrap_err(),
            TreeError::InvalidMinSplitWeight { .. }
        ));
    }

    #[test]
    fn single_label_is_a_leaf_without_consulting_the_factory() {
        let data = vec![vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec![1, 1, 1];
        let learner = learner(ColumnFactory::default());
        let tree = learner.fit(&data, &labels).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(learner.factory.calls(), 0);
        assert_eq!(tree.visit(&vec![9.0]), &[0.0, 1.0]);
    }

    #[test]
    fn factory_without_patterns_yields_root_distribution() {
        let data = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let labels = vec![0, 1, 1, 1];
        let learner = TreeLearner::new(
            TreeConfig::new().with_n_candidates(5),
            EmptyFactory::default(),
            ColumnDistance,
        );
        let tree = learner.fit(&data, &labels).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(learner.factory.calls(), 5);
        assert_eq!(tree.visit(&vec![0.0]), &[0.25, 0.75]);
    }

    #[test]
    fn separable_data_is_classified() {
        let (data, labels) = separable_data();
        let tree = learner(ColumnFactory::default()).fit(&data, &labels).unwrap();
        for (row, &label) in data.iter().zip(&labels) {
            assert_eq!(tree.predict(row), label);
        }
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn leaf_probabilities_sum_to_one() {
        let data: Vec<Vec<f64>> = (0..30).map(|i| vec![f64::from(i % 7), f64::from(i % 4)]).collect();
        let labels: Vec<usize> = (0..30).map(|i| i % 3).collect();
        let tree = TreeLearner::new(
            TreeConfig::new().with_max_depth(Some(2)),
            ColumnFactory::default(),
            ColumnDistance,
        )
        .fit(&data, &labels)
        .unwrap();
        for node in tree.nodes() {
            if let Node::Leaf { probabilities, weight } = node {
                if *weight > 0.0 {
                    let sum: f64 = probabilities.iter().sum();
                    assert!((sum - 1.0).abs() < 1e-9, "sum = {sum}");
                }
            }
        }
    }

    #[test]
    fn leaf_weights_are_fractions_of_the_root() {
        let (data, labels) = separable_data();
        let tree = learner(ColumnFactory::default()).fit(&data, &labels).unwrap();
        let total: f64 = tree
            .nodes()
            .iter()
            .filter(|n| n.is_leaf())
            .map(Node::weight)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((tree.nodes()[0].weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn max_depth_limits_tree() {
        let (data, labels) = separable_data();
        let tree = TreeLearner::new(
            TreeConfig::new().with_max_depth(Some(1)),
            ColumnFactory::default(),
            ColumnDistance,
        )
        .fit(&data, &labels)
        .unwrap();
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn min_split_weight_stops_small_nodes() {
        let (data, labels) = separable_data();
        let tree = TreeLearner::new(
            TreeConfig::new().with_min_split_weight(60.0),
            ColumnFactory::default(),
            ColumnDistance,
        )
        .fit(&data, &labels)
        .unwrap();
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn missing_values_get_their_own_branch() {
        let data = vec![
            vec![0.0],
            vec![1.0],
            vec![2.0],
            vec![3.0],
            vec![f64::NAN],
            vec![f64::NAN],
        ];
        let labels = vec![0, 0, 1, 1, 2, 2];
        let tree = learner(ColumnFactory::default()).fit(&data, &labels).unwrap();
        let Node::Branch { missing, .. } = &tree.nodes()[0] else {
            panic!("root should split");
        };
        assert!(missing.is_some());
        assert_eq!(tree.predict(&vec![f64::NAN]), 2);
        assert_eq!(tree.predict(&vec![0.5]), 0);
        assert_eq!(tree.predict(&vec![2.5]), 1);
    }

    #[test]
    fn undefined_distance_without_missing_child_goes_right() {
        let data = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![f64::NAN]];
        let labels = vec![0, 0, 1, 1, 1];
        let tree = TreeLearner::new(
            TreeConfig::new().with_missing_policy(MissingPolicy::Right),
            ColumnFactory::default(),
            ColumnDistance,
        )
        .fit(&data, &labels)
        .unwrap();
        let Node::Branch { missing, .. } = &tree.nodes()[0] else {
            panic!("root should split");
        };
        assert!(missing.is_none());
        assert_eq!(tree.predict(&vec![f64::NAN]), 1);
    }

    #[test]
    fn builder_and_visitor_agree_on_routing() {
        let (data, labels) = separable_data();
        let tree = learner(ColumnFactory::default()).fit(&data, &labels).unwrap();
        let Node::Branch { threshold, .. } = &tree.nodes()[0] else {
            panic!("root should split");
        };
        let distance = ColumnDistance.compute(&data[0], threshold.pattern());
        assert!(matches!(distance, Distance::Value(_)));
        assert_eq!(threshold.route(distance), Route::Left);
    }

    #[test]
    fn factory_failure_is_propagated() {
        let (data, labels) = separable_data();
        let err = learner(FailingFactory { below: 100 })
            .fit(&data, &labels)
            .unwrap_err();
        assert!(matches!(err, TreeError::PatternFactory { .. }));
    }

    #[test]
    fn deterministic_with_same_seed() {
        let data: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![f64::from(i * 13 % 17), f64::from(i * 7 % 11)])
            .collect();
        let labels: Vec<usize> = (0..40).map(|i| (i * 5 % 9) % 3).collect();
        let config = TreeConfig::new().with_n_candidates(1).with_seed(123);
        let a = TreeLearner::new(config.clone(), ColumnFactory::default(), ColumnDistance)
            .fit(&data, &labels)
            .unwrap();
        let b = TreeLearner::new(config, ColumnFactory::default(), ColumnDistance)
            .fit(&data, &labels)
            .unwrap();
        assert_eq!(a.nodes(), b.nodes());
    }

    /// Alternating labels along one column grow a chain-like tree thousands
    /// of levels deep.
    #[test]
    fn very_deep_tree_is_grown_without_overflow() {
        let n = 6000usize;
        let data: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64]).collect();
        let labels: Vec<usize> = (0..n).map(|i| i % 2).collect();
        let tree = TreeLearner::new(
            TreeConfig::new().with_n_candidates(1),
            ColumnFactory::default(),
            ColumnDistance,
        )
        .fit(&data, &labels)
        .unwrap();

        assert!(tree.depth() > 0);
        for (row, &label) in data.iter().zip(&labels) {
            assert_eq!(tree.predict(row), label);
        }
    }
}
