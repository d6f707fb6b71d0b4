//! Threshold search: the distance cutoff that best splits a node for a pattern.

use rand::Rng;
use tracing::trace;

use crate::class_set::ClassSet;
use crate::criterion::{Criterion, PatternRanking, f_statistic};
use crate::error::TreeError;
use crate::pattern::{Distance, PatternDistance, PatternFactory, TreeRng};

/// Two split impurities closer than this are treated as tied.
const IMPURITY_TOLERANCE: f64 = 1e-12;

/// Where examples with an undefined distance go when a node is partitioned.
///
/// Examples with an undefined distance never take part in the threshold
/// search itself; the policy only decides their routing afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MissingPolicy {
    /// Collect them into a dedicated missing child.
    #[default]
    Separate,
    /// Send them to the right child.
    Right,
    /// Send each one left or right with probability 1/2, drawn from the tree's RNG.
    CoinFlip,
}

/// The decision rule of a split.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Cutoff {
    /// Distances `<=` the value go left, greater ones right.
    ///
    /// The comparison is inclusive everywhere, so re-partitioning the training
    /// distances reproduces the scored sides exactly and a query sitting on
    /// the cutoff goes left, as it did during the sweep.
    Numeric(f64),
    /// Matching examples go left, non-matching ones right.
    Categorical,
}

/// The branch an example takes at a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The left child.
    Left,
    /// The right child.
    Right,
    /// The distance was undefined (or of the wrong kind for the cutoff).
    Missing,
}

impl Cutoff {
    /// Route a distance through this cutoff.
    #[must_use]
    pub fn route(self, distance: Distance) -> Route {
        if distance.is_missing() {
            return Route::Missing;
        }
        match (self, distance) {
            (Cutoff::Numeric(cutoff), Distance::Value(d)) => {
                if d <= cutoff {
                    Route::Left
                } else {
                    Route::Right
                }
            }
            (Cutoff::Categorical, Distance::Match(true)) => Route::Left,
            (Cutoff::Categorical, Distance::Match(false)) => Route::Right,
            _ => Route::Missing,
        }
    }
}

/// A pattern together with the cutoff chosen for it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Threshold<P> {
    pattern: P,
    cutoff: Cutoff,
}

impl<P> Threshold<P> {
    /// Pair a pattern with a cutoff.
    #[must_use]
    pub fn new(pattern: P, cutoff: Cutoff) -> Self {
        Self { pattern, cutoff }
    }

    /// Return the pattern.
    #[must_use]
    pub fn pattern(&self) -> &P {
        &self.pattern
    }

    /// Return the cutoff.
    #[must_use]
    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    /// Route a distance to this threshold's pattern.
    #[must_use]
    pub fn route(&self, distance: Distance) -> Route {
        self.cutoff.route(distance)
    }
}

/// One example's distance to a pattern, with its label and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Distance from the example to the pattern.
    pub distance: Distance,
    /// The example's label.
    pub label: usize,
    /// The example's weight.
    pub weight: f64,
}

/// The best cutoff found for one pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffSearch {
    /// The chosen cutoff.
    pub cutoff: Cutoff,
    /// Weighted impurity of the resulting two-way split (lower is better).
    pub impurity: f64,
    /// Weighted mean distance on the right minus that on the left.
    /// Always `0.0` for categorical cutoffs.
    pub gap: f64,
}

/// Lower impurity wins; within tolerance, the larger gap wins.
fn is_better(impurity: f64, gap: f64, best_impurity: f64, best_gap: f64) -> bool {
    impurity < best_impurity - IMPURITY_TOLERANCE
        || (impurity <= best_impurity + IMPURITY_TOLERANCE && gap > best_gap)
}

/// Find the cutoff minimizing the weighted split impurity of `observations`.
///
/// Observations with an undefined distance are ignored. Numeric distances
/// are sorted once and swept left to right; the per-label weights of both
/// sides are updated incrementally as each group of equal distances crosses
/// over, and a cutoff is evaluated at the first boundary and at every
/// boundary that is not flanked on both sides by groups of one and the same
/// label (such boundaries can never be optimal). The cutoff is the midpoint
/// between the two adjacent distinct distances. Categorical distances have
/// a single equals / not-equals partition.
///
/// Returns `None` when no cutoff puts positive weight on both sides, when
/// the best split does not strictly lower the impurity of the observations,
/// or when numeric and categorical distances are mixed.
#[must_use]
pub fn find_cutoff(
    criterion: Criterion,
    observations: &[Observation],
    n_labels: usize,
) -> Option<CutoffSearch> {
    let present: Vec<&Observation> = observations
        .iter()
        .filter(|o| !o.distance.is_missing())
        .collect();
    let first = present.first()?;

    let categorical = matches!(first.distance, Distance::Match(_));
    if present
        .iter()
        .any(|o| matches!(o.distance, Distance::Match(_)) != categorical)
    {
        trace!("pattern mixes numeric and categorical distances");
        return None;
    }

    let mut parent = vec![0.0f64; n_labels];
    let mut total = 0.0f64;
    for o in &present {
        parent[o.label] += o.weight;
        total += o.weight;
    }
    let parent_impurity = criterion.impurity(&parent, total);

    let best = if categorical {
        categorical_cutoff(criterion, &present, n_labels)
    } else {
        numeric_cutoff(criterion, &present, &parent, total)
    };
    best.filter(|b| b.impurity < parent_impurity - IMPURITY_TOLERANCE)
}

fn categorical_cutoff(
    criterion: Criterion,
    present: &[&Observation],
    n_labels: usize,
) -> Option<CutoffSearch> {
    let mut left = vec![0.0f64; n_labels];
    let mut right = vec![0.0f64; n_labels];
    let (mut left_weight, mut right_weight) = (0.0f64, 0.0f64);
    for o in present {
        if o.distance == Distance::Match(true) {
            left[o.label] += o.weight;
            left_weight += o.weight;
        } else {
            right[o.label] += o.weight;
            right_weight += o.weight;
        }
    }
    if left_weight <= 0.0 || right_weight <= 0.0 {
        return None;
    }
    Some(CutoffSearch {
        cutoff: Cutoff::Categorical,
        impurity: criterion.split_impurity(&left, left_weight, &right, right_weight),
        gap: 0.0,
    })
}

/// A run of equal distances in the sorted sweep.
struct Group {
    start: usize,
    end: usize,
    /// The label shared by every member, if there is one.
    pure_label: Option<usize>,
}

fn numeric_cutoff(
    criterion: Criterion,
    present: &[&Observation],
    parent: &[f64],
    total: f64,
) -> Option<CutoffSearch> {
    let mut sorted: Vec<(f64, usize, f64)> = present
        .iter()
        .filter_map(|o| match o.distance {
            Distance::Value(d) => Some((d, o.label, o.weight)),
            _ => None,
        })
        .collect();
    sorted.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let value = sorted[start].0;
        let mut end = start + 1;
        while end < sorted.len() && sorted[end].0 == value {
            end += 1;
        }
        let label = sorted[start].1;
        let pure_label = sorted[start..end]
            .iter()
            .all(|e| e.1 == label)
            .then_some(label);
        groups.push(Group {
            start,
            end,
            pure_label,
        });
        start = end;
    }

    // Incremental sweep: left grows from empty, right shrinks from full.
    let mut left = vec![0.0f64; parent.len()];
    let mut right = parent.to_vec();
    let (mut left_weight, mut right_weight) = (0.0f64, total);
    let mut left_sum = 0.0f64;
    let mut right_sum: f64 = sorted.iter().map(|&(d, _, w)| d * w).sum();

    let mut best: Option<CutoffSearch> = None;
    for (g, pair) in groups.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        for &(d, label, w) in &sorted[current.start..current.end] {
            left[label] += w;
            right[label] -= w;
            left_weight += w;
            right_weight -= w;
            left_sum += d * w;
            right_sum -= d * w;
        }

        if g > 0 && current.pure_label.is_some() && current.pure_label == next.pure_label {
            continue;
        }
        if left_weight <= 0.0 || right_weight <= 0.0 {
            continue;
        }

        let impurity = criterion.split_impurity(&left, left_weight, &right, right_weight);
        let gap = right_sum / right_weight - left_sum / left_weight;
        if best
            .as_ref()
            .map_or(true, |b| is_better(impurity, gap, b.impurity, b.gap))
        {
            let cutoff = midpoint(sorted[current.start].0, sorted[next.start].0);
            best = Some(CutoffSearch {
                cutoff: Cutoff::Numeric(cutoff),
                impurity,
                gap,
            });
        }
    }
    best
}

/// Midpoint of two adjacent distinct distances, kept strictly below `hi`
/// so that `d <= cutoff` reproduces the sweep's partition exactly.
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid < hi { mid } else { lo }
}

/// A scored split of one node: threshold, impurity, gap and the per-example
/// distances it was computed from, aligned with [`ClassSet::iter`].
#[derive(Debug, Clone)]
pub struct ScoredSplit<P> {
    threshold: Threshold<P>,
    impurity: f64,
    gap: f64,
    distances: Vec<Distance>,
}

impl<P> ScoredSplit<P> {
    /// Return the threshold.
    #[must_use]
    pub fn threshold(&self) -> &Threshold<P> {
        &self.threshold
    }

    /// Return the weighted split impurity.
    #[must_use]
    pub fn impurity(&self) -> f64 {
        self.impurity
    }

    /// Return the gap between the per-side mean distances.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Return the per-example distances, in [`ClassSet::iter`] order.
    #[must_use]
    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// Consume the split and return its threshold.
    #[must_use]
    pub fn into_threshold(self) -> Threshold<P> {
        self.threshold
    }
}

/// The three child class sets produced by partitioning a node.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Examples routed left.
    pub left: ClassSet,
    /// Examples routed right.
    pub right: ClassSet,
    /// Examples with an undefined distance under [`MissingPolicy::Separate`].
    pub missing: ClassSet,
}

impl Partition {
    /// Return how many of the three children hold at least one example.
    #[must_use]
    pub fn n_non_empty(&self) -> usize {
        [&self.left, &self.right, &self.missing]
            .iter()
            .filter(|set| !set.is_empty())
            .count()
    }
}

/// Scores candidate patterns against a node using injected strategies.
///
/// Holds references to the pattern factory and distance plus the criterion,
/// ranking, missing-value policy and number of candidates per node. One
/// splitter can be shared by every tree of an ensemble.
#[derive(Debug)]
pub struct Splitter<'a, F, D> {
    factory: &'a F,
    distance: &'a D,
    criterion: Criterion,
    ranking: PatternRanking,
    missing_policy: MissingPolicy,
    n_candidates: usize,
}

impl<'a, F, D> Splitter<'a, F, D> {
    /// Create a splitter with entropy, impurity ranking, a separate missing
    /// child and 10 candidates per node.
    #[must_use]
    pub fn new(factory: &'a F, distance: &'a D) -> Self {
        Self {
            factory,
            distance,
            criterion: Criterion::Entropy,
            ranking: PatternRanking::Impurity,
            missing_policy: MissingPolicy::Separate,
            n_candidates: 10,
        }
    }

    /// Set the impurity criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set how candidate patterns are ranked.
    #[must_use]
    pub fn with_pattern_ranking(mut self, ranking: PatternRanking) -> Self {
        self.ranking = ranking;
        self
    }

    /// Set the missing-value routing policy.
    #[must_use]
    pub fn with_missing_policy(mut self, missing_policy: MissingPolicy) -> Self {
        self.missing_policy = missing_policy;
        self
    }

    /// Set the number of pattern factory attempts per node.
    #[must_use]
    pub fn with_n_candidates(mut self, n_candidates: usize) -> Self {
        self.n_candidates = n_candidates;
        self
    }

    /// Return the missing-value routing policy.
    #[must_use]
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing_policy
    }

    /// Return the distance candidates are scored with.
    #[must_use]
    pub fn distance(&self) -> &'a D {
        self.distance
    }

    /// Compute every example's distance to `pattern`, in [`ClassSet::iter`] order.
    pub fn distances<X, P>(&self, data: &[X], class_set: &ClassSet, pattern: &P) -> Vec<Distance>
    where
        D: PatternDistance<X, P>,
    {
        class_set
            .iter()
            .map(|(_, example)| self.distance.compute(&data[example.index()], pattern))
            .collect()
    }

    /// Find the best cutoff for one candidate pattern, or `None` if it cannot split the node.
    pub fn threshold_search<X, P>(
        &self,
        data: &[X],
        class_set: &ClassSet,
        pattern: P,
    ) -> Option<ScoredSplit<P>>
    where
        D: PatternDistance<X, P>,
    {
        let distances = self.distances(data, class_set, &pattern);
        self.score(class_set, pattern, distances)
    }

    fn score<P>(
        &self,
        class_set: &ClassSet,
        pattern: P,
        distances: Vec<Distance>,
    ) -> Option<ScoredSplit<P>> {
        let observations: Vec<Observation> = class_set
            .iter()
            .zip(&distances)
            .map(|((label, example), &distance)| Observation {
                distance,
                label,
                weight: example.weight(),
            })
            .collect();
        let search = find_cutoff(self.criterion, &observations, class_set.n_labels())?;
        Some(ScoredSplit {
            threshold: Threshold::new(pattern, search.cutoff),
            impurity: search.impurity,
            gap: search.gap,
            distances,
        })
    }

    /// Sample up to `n_candidates` patterns and return the best split among them.
    ///
    /// Attempts where the factory returns `None` are skipped, not retried.
    /// Returns `Ok(None)` when no candidate yields a valid split.
    ///
    /// # Errors
    ///
    /// Propagates [`TreeError::PatternFactory`] from the factory.
    pub fn best_split<X>(
        &self,
        data: &[X],
        class_set: &ClassSet,
        rng: &mut TreeRng,
    ) -> Result<Option<ScoredSplit<F::Pattern>>, TreeError>
    where
        F: PatternFactory<X>,
        D: PatternDistance<X, F::Pattern>,
    {
        match self.ranking {
            PatternRanking::Impurity => {
                let mut best: Option<ScoredSplit<F::Pattern>> = None;
                for attempt in 0..self.n_candidates {
                    let Some(pattern) = self.factory.create(data, class_set, rng)? else {
                        trace!(attempt, "factory produced no pattern");
                        continue;
                    };
                    let Some(split) = self.threshold_search(data, class_set, pattern) else {
                        trace!(attempt, "candidate cannot split the node");
                        continue;
                    };
                    if best
                        .as_ref()
                        .map_or(true, |b| is_better(split.impurity, split.gap, b.impurity, b.gap))
                    {
                        best = Some(split);
                    }
                }
                Ok(best)
            }
            PatternRanking::FStatistic => {
                let mut best: Option<(f64, F::Pattern, Vec<Distance>)> = None;
                for attempt in 0..self.n_candidates {
                    let Some(pattern) = self.factory.create(data, class_set, rng)? else {
                        trace!(attempt, "factory produced no pattern");
                        continue;
                    };
                    let distances = self.distances(data, class_set, &pattern);
                    let rank = rank_by_f_statistic(class_set, &distances);
                    if best.as_ref().map_or(true, |(best_rank, _, _)| rank > *best_rank) {
                        best = Some((rank, pattern, distances));
                    }
                }
                Ok(best.and_then(|(_, pattern, distances)| self.score(class_set, pattern, distances)))
            }
        }
    }

    /// Partition a node into left, right and missing children by `split`.
    ///
    /// Uses the distances cached in `split`, so `class_set` must be the set
    /// the split was scored on. Undefined distances are routed by the
    /// missing-value policy; [`MissingPolicy::CoinFlip`] draws from `rng`.
    pub fn partition<P>(
        &self,
        class_set: &ClassSet,
        split: &ScoredSplit<P>,
        rng: &mut TreeRng,
    ) -> Partition {
        let n_labels = class_set.n_labels();
        let mut partition = Partition {
            left: ClassSet::empty(n_labels),
            right: ClassSet::empty(n_labels),
            missing: ClassSet::empty(n_labels),
        };
        for ((label, example), &distance) in class_set.iter().zip(&split.distances) {
            let side = match split.threshold.route(distance) {
                Route::Left => &mut partition.left,
                Route::Right => &mut partition.right,
                Route::Missing => match self.missing_policy {
                    MissingPolicy::Separate => &mut partition.missing,
                    MissingPolicy::Right => &mut partition.right,
                    MissingPolicy::CoinFlip => {
                        if rng.gen_bool(0.5) {
                            &mut partition.left
                        } else {
                            &mut partition.right
                        }
                    }
                },
            };
            side.add(label, example);
        }
        partition
    }
}

/// F-statistic of the defined distances; categorical matches count as 0, mismatches as 1.
fn rank_by_f_statistic(class_set: &ClassSet, distances: &[Distance]) -> f64 {
    let observations: Vec<(f64, usize, f64)> = class_set
        .iter()
        .zip(distances)
        .filter_map(|((label, example), &distance)| {
            let value = match distance {
                Distance::Value(v) if !v.is_nan() => v,
                Distance::Match(true) => 0.0,
                Distance::Match(false) => 1.0,
                _ => return None,
            };
            Some((value, label, example.weight()))
        })
        .collect();
    f_statistic(&observations, class_set.n_labels())
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::testing::{ColumnDistance, ColumnFactory, EmptyFactory};

    fn numeric(values: &[f64], labels: &[usize]) -> Vec<Observation> {
        values
            .iter()
            .zip(labels)
            .map(|(&d, &label)| Observation {
                distance: Distance::Value(d),
                label,
                weight: 1.0,
            })
            .collect()
    }

    #[test]
    fn two_pure_groups_split_at_midpoint() {
        let obs = numeric(&[0.0, 1.0, 2.0, 3.0], &[0, 0, 1, 1]);
        let best = find_cutoff(Criterion::Entropy, &obs, 2).expect("should split");
        assert_eq!(best.cutoff, Cutoff::Numeric(1.5));
        assert!(best.impurity.abs() < 1e-12);
        assert!((best.gap - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let obs = numeric(&[3.0, 0.0, 2.0, 1.0], &[1, 0, 1, 0]);
        let best = find_cutoff(Criterion::Gini, &obs, 2).unwrap();
        assert_eq!(best.cutoff, Cutoff::Numeric(1.5));
    }

    #[test]
    fn equal_impurity_prefers_larger_gap() {
        // Cutting 0|1 or 1|10 both cost 2/3 bit; the second separates the means further.
        let obs = numeric(&[0.0, 1.0, 10.0], &[0, 1, 2]);
        let best = find_cutoff(Criterion::Entropy, &obs, 3).unwrap();
        assert_eq!(best.cutoff, Cutoff::Numeric(5.5));
        assert!((best.impurity - 2.0 / 3.0).abs() < 1e-12);
        assert!((best.gap - 9.5).abs() < 1e-12);
    }

    #[test]
    fn identical_distances_cannot_split() {
        let obs = numeric(&[4.0, 4.0, 4.0], &[0, 1, 0]);
        assert!(find_cutoff(Criterion::Entropy, &obs, 2).is_none());
    }

    #[test]
    fn split_without_improvement_is_rejected() {
        // Both sides stay perfectly mixed.
        let obs = numeric(&[0.0, 0.0, 1.0, 1.0], &[0, 1, 0, 1]);
        assert!(find_cutoff(Criterion::Entropy, &obs, 2).is_none());
    }

    #[test]
    fn weights_shift_the_cutoff() {
        // Unweighted, 0|1 and 1|2 tie exactly and the first is kept.
        let mut obs = numeric(&[0.0, 1.0, 2.0], &[0, 1, 0]);
        let best = find_cutoff(Criterion::Entropy, &obs, 2).unwrap();
        assert_eq!(best.cutoff, Cutoff::Numeric(0.5));

        obs[2].weight = 5.0;
        let best = find_cutoff(Criterion::Entropy, &obs, 2).unwrap();
        assert_eq!(best.cutoff, Cutoff::Numeric(1.5));
    }

    #[test]
    fn missing_distances_are_ignored() {
        let mut obs = numeric(&[0.0, 1.0, 2.0, 3.0], &[0, 0, 1, 1]);
        obs.push(Observation {
            distance: Distance::Missing,
            label: 0,
            weight: 10.0,
        });
        obs.push(Observation {
            distance: Distance::Value(f64::NAN),
            label: 1,
            weight: 10.0,
        });
        let best = find_cutoff(Criterion::Entropy, &obs, 2).unwrap();
        assert_eq!(best.cutoff, Cutoff::Numeric(1.5));
        assert!(best.impurity.abs() < 1e-12);
    }

    #[test]
    fn all_missing_yields_none() {
        let obs = vec![
            Observation {
                distance: Distance::Missing,
                label: 0,
                weight: 1.0,
            };
            3
        ];
        assert!(find_cutoff(Criterion::Entropy, &obs, 1).is_none());
    }

    #[test]
    fn categorical_partition_is_scored_directly() {
        let obs: Vec<Observation> = [(true, 0), (true, 0), (false, 1), (false, 0)]
            .iter()
            .map(|&(m, label)| Observation {
                distance: Distance::Match(m),
                label,
                weight: 1.0,
            })
            .collect();
        let best = find_cutoff(Criterion::Entropy, &obs, 2).unwrap();
        assert_eq!(best.cutoff, Cutoff::Categorical);
        assert!((best.impurity - 0.5).abs() < 1e-12);
        assert_eq!(best.gap, 0.0);
    }

    #[test]
    fn categorical_with_one_side_empty_is_rejected() {
        let obs: Vec<Observation> = [(true, 0), (true, 1)]
            .iter()
            .map(|&(m, label)| Observation {
                distance: Distance::Match(m),
                label,
                weight: 1.0,
            })
            .collect();
        assert!(find_cutoff(Criterion::Entropy, &obs, 2).is_none());
    }

    #[test]
    fn mixed_distance_kinds_are_rejected() {
        let obs = vec![
            Observation {
                distance: Distance::Value(1.0),
                label: 0,
                weight: 1.0,
            },
            Observation {
                distance: Distance::Match(true),
                label: 1,
                weight: 1.0,
            },
        ];
        assert!(find_cutoff(Criterion::Entropy, &obs, 2).is_none());
    }

    #[test]
    fn repartition_reproduces_reported_impurity() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let n = rng.gen_range(2..40);
            let values: Vec<f64> = (0..n).map(|_| f64::from(rng.gen_range(0..12u8))).collect();
            let labels: Vec<usize> = (0..n).map(|_| rng.gen_range(0..3)).collect();
            let obs = numeric(&values, &labels);
            let Some(best) = find_cutoff(Criterion::Entropy, &obs, 3) else {
                continue;
            };
            let Cutoff::Numeric(t) = best.cutoff else {
                panic!("numeric distances gave a categorical cutoff");
            };

            let mut left = vec![0.0; 3];
            let mut right = vec![0.0; 3];
            for (&d, &label) in values.iter().zip(&labels) {
                if d <= t {
                    left[label] += 1.0;
                } else {
                    right[label] += 1.0;
                }
            }
            let lw: f64 = left.iter().sum();
            let rw: f64 = right.iter().sum();
            let impurity = Criterion::Entropy.split_impurity(&left, lw, &right, rw);
            assert!((impurity - best.impurity).abs() < 1e-9);
        }
    }

    #[test]
    fn adjacent_floats_keep_cutoff_below_upper_value() {
        let lo = 1.0f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let t = midpoint(lo, hi);
        assert!(lo <= t && t < hi);
    }

    fn column_set() -> (Vec<Vec<f64>>, ClassSet) {
        let data = vec![
            vec![0.0],
            vec![1.0],
            vec![f64::NAN],
            vec![2.0],
            vec![3.0],
            vec![f64::NAN],
        ];
        let set = ClassSet::from_labels(&[0, 0, 0, 1, 1, 1], 2).unwrap();
        (data, set)
    }

    #[test]
    fn partition_weights_add_up_for_every_policy() {
        let (data, set) = column_set();
        let factory = ColumnFactory::default();
        for policy in [MissingPolicy::Separate, MissingPolicy::Right, MissingPolicy::CoinFlip] {
            let splitter = Splitter::new(&factory, &ColumnDistance).with_missing_policy(policy);
            let split = splitter.threshold_search(&data, &set, 0usize).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let p = splitter.partition(&set, &split, &mut rng);
            let sum = p.left.total_weight() + p.right.total_weight() + p.missing.total_weight();
            assert!((sum - set.total_weight()).abs() < 1e-12, "{policy:?}");
        }
    }

    #[test]
    fn separate_policy_isolates_missing_examples() {
        let (data, set) = column_set();
        let factory = ColumnFactory::default();
        let splitter = Splitter::new(&factory, &ColumnDistance);
        let split = splitter.threshold_search(&data, &set, 0usize).unwrap();
        let p = splitter.partition(&set, &split, &mut ChaCha8Rng::seed_from_u64(1));
        let mut missing: Vec<usize> = p.missing.iter().map(|(_, e)| e.index()).collect();
        missing.sort_unstable();
        assert_eq!(missing, vec![2, 5]);
        assert_eq!(p.left.n_examples(), 2);
        assert_eq!(p.right.n_examples(), 2);
        assert_eq!(p.n_non_empty(), 3);
    }

    #[test]
    fn right_policy_sends_missing_right() {
        let (data, set) = column_set();
        let factory = ColumnFactory::default();
        let splitter =
            Splitter::new(&factory, &ColumnDistance).with_missing_policy(MissingPolicy::Right);
        let split = splitter.threshold_search(&data, &set, 0usize).unwrap();
        let p = splitter.partition(&set, &split, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(p.missing.is_empty());
        assert_eq!(p.right.n_examples(), 4);
        assert_eq!(p.n_non_empty(), 2);
    }

    #[test]
    fn distance_on_the_cutoff_goes_left() {
        let cutoff = Cutoff::Numeric(1.5);
        assert_eq!(cutoff.route(Distance::Value(1.5)), Route::Left);
        assert_eq!(cutoff.route(Distance::Value(1.5 + 1e-9)), Route::Right);
        assert_eq!(cutoff.route(Distance::Missing), Route::Missing);
        assert_eq!(Cutoff::Categorical.route(Distance::Value(0.0)), Route::Missing);
    }

    #[test]
    fn coin_flip_policy_spreads_missing_examples_over_both_sides() {
        // Rows 0..200 split cleanly at 99.5; rows 200..400 are missing.
        let data: Vec<Vec<f64>> = (0..400)
            .map(|i| vec![if i < 200 { f64::from(i) } else { f64::NAN }])
            .collect();
        let labels: Vec<usize> = (0..400)
            .map(|i| if i < 200 { usize::from(i >= 100) } else { i % 2 })
            .collect();
        let set = ClassSet::from_labels(&labels, 2).unwrap();
        let factory = ColumnFactory::default();
        let splitter =
            Splitter::new(&factory, &ColumnDistance).with_missing_policy(MissingPolicy::CoinFlip);
        let split = splitter.threshold_search(&data, &set, 0usize).unwrap();

        let sides = |seed: u64| {
            let p = splitter.partition(&set, &split, &mut ChaCha8Rng::seed_from_u64(seed));
            assert!(p.missing.is_empty());
            let mut left: Vec<usize> = p.left.iter().map(|(_, e)| e.index()).collect();
            let mut right: Vec<usize> = p.right.iter().map(|(_, e)| e.index()).collect();
            left.sort_unstable();
            right.sort_unstable();
            (left, right)
        };

        let (left, right) = sides(9);
        let missing_left = left.iter().filter(|&&i| i >= 200).count();
        let missing_right = right.iter().filter(|&&i| i >= 200).count();
        assert_eq!(missing_left + missing_right, 200);
        assert!(missing_left > 50 && missing_right > 50, "{missing_left} / {missing_right}");
        assert_eq!(left.iter().filter(|&&i| i < 200).count(), 100);
        assert_eq!(right.iter().filter(|&&i| i < 200).count(), 100);

        assert_eq!(sides(9), (left, right));
    }

    #[test]
    fn best_split_skips_empty_attempts() {
        let (data, set) = column_set();
        let factory = EmptyFactory::default();
        let splitter = Splitter::new(&factory, &ColumnDistance).with_n_candidates(7);
        let best = splitter
            .best_split(&data, &set, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert!(best.is_none());
        assert_eq!(factory.calls(), 7);
    }

    #[test]
    fn best_split_picks_the_informative_column() {
        // Column 1 separates the labels, column 0 is noise.
        let data: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i * 7 % 5) as f64, if i < 10 { 0.0 } else { 1.0 }])
            .collect();
        let labels: Vec<usize> = (0..20).map(|i| usize::from(i >= 10)).collect();
        let set = ClassSet::from_labels(&labels, 2).unwrap();
        let factory = ColumnFactory::default();
        for ranking in [PatternRanking::Impurity, PatternRanking::FStatistic] {
            let splitter = Splitter::new(&factory, &ColumnDistance)
                .with_n_candidates(20)
                .with_pattern_ranking(ranking);
            let best = splitter
                .best_split(&data, &set, &mut ChaCha8Rng::seed_from_u64(4))
                .unwrap()
                .expect("a split exists");
            assert_eq!(*best.threshold().pattern(), 1, "{ranking:?}");
            assert!(best.impurity().abs() < 1e-12);
        }
    }
}
