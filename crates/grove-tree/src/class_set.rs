//! Weighted, per-label index of training examples.

use crate::error::TreeError;

/// A training example reference: its row index in the data and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example {
    index: usize,
    weight: f64,
}

impl Example {
    /// Create an example reference for row `index` with the given weight.
    #[must_use]
    pub fn new(index: usize, weight: f64) -> Self {
        Self { index, weight }
    }

    /// Return the zero-based row index into the training data.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Return the example weight (1 at the root, the draw count after bootstrapping).
    #[must_use]
    pub fn weight(self) -> f64 {
        self.weight
    }
}

/// All examples sharing one label at a node, with their summed weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    examples: Vec<Example>,
    weight: f64,
}

impl Sample {
    /// Return the examples in insertion order.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Return the summed weight of the examples.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Return the number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Return `true` if the sample holds no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    fn push(&mut self, example: Example) {
        self.weight += example.weight;
        self.examples.push(example);
    }
}

/// Weighted examples at a tree node, grouped by label.
///
/// Holds one [`Sample`] per label of the global domain `0..n_labels`
/// (empty where the label is absent) and caches the total weight. Each
/// example index is expected to appear in exactly one sample; the
/// constructors in this crate preserve that, and [`ClassSet::add`] callers
/// are responsible for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSet {
    samples: Vec<Sample>,
    total_weight: f64,
}

impl ClassSet {
    /// Create an empty class set over a domain of `n_labels` labels.
    #[must_use]
    pub fn empty(n_labels: usize) -> Self {
        Self {
            samples: vec![Sample::default(); n_labels],
            total_weight: 0.0,
        }
    }

    /// Create the root class set: example `i` gets label `labels[i]` and weight 1.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::LabelOutOfDomain`] if any label is `>= n_labels`.
    pub fn from_labels(labels: &[usize], n_labels: usize) -> Result<Self, TreeError> {
        let mut set = Self::empty(n_labels);
        for (example_index, &label) in labels.iter().enumerate() {
            if label >= n_labels {
                return Err(TreeError::LabelOutOfDomain {
                    label,
                    example_index,
                    n_labels,
                });
            }
            set.add(label, Example::new(example_index, 1.0));
        }
        Ok(set)
    }

    /// Add an example under `label`.
    ///
    /// # Panics
    ///
    /// Panics if `label >= self.n_labels()`.
    pub fn add(&mut self, label: usize, example: Example) {
        self.total_weight += example.weight;
        self.samples[label].push(example);
    }

    /// Return the size of the label domain.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.samples.len()
    }

    /// Return the cached total weight of all examples.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Return the number of examples across all labels.
    #[must_use]
    pub fn n_examples(&self) -> usize {
        self.samples.iter().map(Sample::len).sum()
    }

    /// Return `true` if the set holds no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(Sample::is_empty)
    }

    /// Return the sample for `label`.
    ///
    /// # Panics
    ///
    /// Panics if `label >= self.n_labels()`.
    #[must_use]
    pub fn sample(&self, label: usize) -> &Sample {
        &self.samples[label]
    }

    /// Return all samples, indexed by label.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Return the number of labels with at least one example.
    #[must_use]
    pub fn n_distinct_labels(&self) -> usize {
        self.samples.iter().filter(|s| !s.is_empty()).count()
    }

    /// Iterate over `(label, example)` pairs, label by label.
    ///
    /// The order is stable for a given set and is the order every
    /// per-example buffer in the splitter is aligned with.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Example)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .flat_map(|(label, sample)| sample.examples.iter().map(move |&e| (label, e)))
    }

    /// Return the summed weight per label.
    #[must_use]
    pub fn class_weights(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::weight).collect()
    }

    /// Return `weight(label) / total_weight` for every label (all zeros when empty).
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        if self.total_weight <= 0.0 {
            return vec![0.0; self.samples.len()];
        }
        self.samples
            .iter()
            .map(|s| s.weight / self.total_weight)
            .collect()
    }
}
