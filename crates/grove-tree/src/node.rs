use std::fmt;

use crate::splitter::Threshold;

/// Index into a `Vec<Node>` arena, identifying a specific node in a tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Create a new node index from a zero-based arena position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Criterion-agnostic impurity value (Entropy or Gini).
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd,
    serde::Serialize, serde::Deserialize,
)]
pub struct Impurity(f64);

impl Impurity {
    /// Create a new impurity value.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw impurity value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Impurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A node in a pattern tree arena.
///
/// Trees are stored as `Vec<Node<P>>` where children are referenced by
/// [`NodeIndex`]; the root is always at index 0.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node<P> {
    /// An interior node testing one pattern.
    Branch {
        /// Pattern and cutoff routing examples to the children.
        threshold: Threshold<P>,
        /// Child for examples routed left.
        left: NodeIndex,
        /// Child for examples routed right.
        right: NodeIndex,
        /// Child for examples with an undefined distance, when they were kept apart.
        missing: Option<NodeIndex>,
        /// Weight per label of the training examples that reached this node.
        class_distribution: Vec<f64>,
        /// Weighted impurity of the chosen split.
        impurity: Impurity,
        /// Node weight as a fraction of the root weight.
        weight: f64,
    },
    /// A terminal node.
    Leaf {
        /// Probability per label; sums to 1.
        probabilities: Vec<f64>,
        /// Node weight as a fraction of the root weight.
        weight: f64,
    },
}

impl<P> Node<P> {
    /// Return the node weight as a fraction of the root weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        match self {
            Node::Branch { weight, .. } | Node::Leaf { weight, .. } => *weight,
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
