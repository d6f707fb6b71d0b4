//! Out-of-bag (OOB) bookkeeping and evaluation for ensembles.

use tracing::{debug, instrument};

use crate::error::TreeError;
use crate::forest::Ensemble;
use crate::pattern::PatternDistance;
use crate::predict::ClassDistribution;
use crate::tree::label_domain;

/// Boolean matrix of shape `[n_rows × n_members]`.
///
/// Cell `(i, m)` is `true` iff example `i` was not drawn into member `m`'s
/// bootstrap sample.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OobMatrix {
    n_rows: usize,
    n_members: usize,
    /// Row-major cells.
    cells: Vec<bool>,
}

impl OobMatrix {
    /// Assemble the matrix from one column per member, in member order.
    ///
    /// # Panics
    ///
    /// Panics if a column does not have `n_rows` entries.
    pub(crate) fn from_columns(n_rows: usize, columns: &[Vec<bool>]) -> Self {
        let n_members = columns.len();
        let mut cells = vec![false; n_rows * n_members];
        for (m, column) in columns.iter().enumerate() {
            assert_eq!(column.len(), n_rows, "OOB column {m} has the wrong length");
            for (i, &flag) in column.iter().enumerate() {
                cells[i * n_members + m] = flag;
            }
        }
        Self {
            n_rows,
            n_members,
            cells,
        }
    }

    /// Return the number of training examples.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Return the number of members.
    #[must_use]
    pub fn n_members(&self) -> usize {
        self.n_members
    }

    /// Return `true` iff example `row` is out of bag for `member`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `member` is out of range.
    #[must_use]
    pub fn get(&self, row: usize, member: usize) -> bool {
        assert!(row < self.n_rows && member < self.n_members, "OOB cell out of range");
        self.cells[row * self.n_members + member]
    }

    /// Return the flags of one example across all members.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[bool] {
        assert!(row < self.n_rows, "OOB row out of range");
        let start = row * self.n_members;
        &self.cells[start..start + self.n_members]
    }

    /// Return the flags of one member across all examples.
    #[must_use]
    pub fn column(&self, member: usize) -> Vec<bool> {
        (0..self.n_rows).map(|i| self.get(i, member)).collect()
    }

    /// Return the fraction of cells that are `true`, or 0 for an empty matrix.
    #[must_use]
    pub fn true_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().filter(|&&c| c).count() as f64 / self.cells.len() as f64
    }
}

/// Out-of-bag evaluation result.
#[derive(Debug, Clone)]
pub struct OobScore {
    /// OOB accuracy (fraction of correctly predicted OOB examples).
    pub accuracy: f64,
    /// Number of examples that had at least one OOB member.
    pub n_oob_samples: usize,
    /// Per-example estimate from its OOB members; `None` when it has none.
    pub estimates: Vec<Option<ClassDistribution>>,
}

impl<P, D> Ensemble<P, D> {
    /// Estimate every training example from only the members it was out of bag for.
    ///
    /// `data` and `labels` must be the training set the ensemble was fitted on.
    /// Examples with no OOB member are skipped.
    ///
    /// # Errors
    ///
    /// | Variant                              | When                                      |
    /// |--------------------------------------|-------------------------------------------|
    /// | [`TreeError::LengthMismatch`]        | `data` and `labels` differ in length      |
    /// | [`TreeError::EmptyDataset`]          | no examples                               |
    /// | [`TreeError::LabelOutOfDomain`]      | a label is outside the fitted domain      |
    /// | [`TreeError::OobEvaluationFailed`]   | row count differs from the fit, or no example has any OOB member |
    #[instrument(skip_all, fields(n_examples = data.len(), n_members = self.members.len()))]
    pub fn oob_score<X>(&self, data: &[X], labels: &[usize]) -> Result<OobScore, TreeError>
    where
        D: PatternDistance<X, P>,
    {
        label_domain(data, labels)?;
        if data.len() != self.oob.n_rows() {
            return Err(TreeError::OobEvaluationFailed {
                reason: format!(
                    "ensemble was fitted on {} examples, got {}",
                    self.oob.n_rows(),
                    data.len()
                ),
            });
        }
        if let Some((example_index, &label)) =
            labels.iter().enumerate().find(|&(_, &l)| l >= self.n_labels)
        {
            return Err(TreeError::LabelOutOfDomain {
                label,
                example_index,
                n_labels: self.n_labels,
            });
        }

        let mut estimates = Vec::with_capacity(data.len());
        let mut correct = 0usize;
        let mut n_oob_samples = 0usize;

        for (i, (example, &label)) in data.iter().zip(labels).enumerate() {
            let mut sum = vec![0.0f64; self.n_labels];
            let mut n_votes = 0usize;
            for (member, &oob) in self.members.iter().zip(self.oob.row(i)) {
                if !oob {
                    continue;
                }
                for (s, p) in sum.iter_mut().zip(member.visit(example)) {
                    *s += p;
                }
                n_votes += 1;
            }
            if n_votes == 0 {
                estimates.push(None);
                continue;
            }
            sum.iter_mut().for_each(|v| *v /= n_votes as f64);
            let estimate = ClassDistribution::new(sum);
            if estimate.predicted_class() == label {
                correct += 1;
            }
            n_oob_samples += 1;
            estimates.push(Some(estimate));
        }

        if n_oob_samples == 0 {
            return Err(TreeError::OobEvaluationFailed {
                reason: "no example has any OOB member".to_string(),
            });
        }

        let accuracy = correct as f64 / n_oob_samples as f64;
        debug!(accuracy, n_oob_samples, "OOB evaluation complete");

        Ok(OobScore {
            accuracy,
            n_oob_samples,
            estimates,
        })
    }
}
