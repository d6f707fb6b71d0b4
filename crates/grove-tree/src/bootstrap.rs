//! Weighted bootstrap resampling with out-of-bag bookkeeping.

use rand::Rng;

use crate::class_set::{ClassSet, Example};

/// The outcome of one bootstrap draw.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    /// Examples drawn at least once, weighted by their draw count.
    pub in_bag: ClassSet,
    /// One flag per training row: `true` iff the row was never drawn.
    pub out_of_bag: Vec<bool>,
}

/// Draw `n` examples uniformly with replacement, `n` being the size of `class_set`.
///
/// Every example drawn at least once enters the in-bag set with weight equal
/// to its draw count; every example never drawn has its out-of-bag flag set.
/// The flag vector has `n_rows` entries and is indexed by example row index,
/// so rows absent from `class_set` stay `false`. The RNG is passed
/// explicitly so that each ensemble member samples independently and
/// reproducibly.
///
/// # Panics
///
/// Panics if an example row index in `class_set` is `>= n_rows`.
pub fn bootstrap(class_set: &ClassSet, n_rows: usize, rng: &mut impl Rng) -> Bootstrap {
    let entries: Vec<(usize, Example)> = class_set.iter().collect();
    let n = entries.len();

    let mut draws = vec![0u32; n];
    for _ in 0..n {
        draws[rng.gen_range(0..n)] += 1;
    }

    let mut in_bag = ClassSet::empty(class_set.n_labels());
    let mut out_of_bag = vec![false; n_rows];
    for (&(label, example), &count) in entries.iter().zip(&draws) {
        if count > 0 {
            in_bag.add(label, Example::new(example.index(), f64::from(count)));
        } else {
            out_of_bag[example.index()] = true;
        }
    }

    Bootstrap { in_bag, out_of_bag }
}
