//! Z-normalization of series windows.

use crate::error::PatternError;

/// Population mean and standard deviation (divides by n, not n-1).
///
/// Returns `(0.0, 0.0)` for an empty slice.
#[must_use]
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Return `true` when `std` is negligible next to `mean`, i.e. the values are constant
/// up to rounding.
#[must_use]
pub fn is_constant(mean: f64, std: f64) -> bool {
    std <= 1e-12 * mean.abs().max(1.0)
}

/// Z-normalize values to zero mean and unit variance.
///
/// Uses population standard deviation (divides by n, not n-1).
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`PatternError::EmptySeries`] | `values` is empty |
/// | [`PatternError::ConstantSeries`] | All values are identical (zero variance) |
pub fn z_normalize(values: &[f64]) -> Result<Vec<f64>, PatternError> {
    let Some(&first) = values.first() else {
        return Err(PatternError::EmptySeries);
    };
    let (mean, std) = mean_std(values);
    if is_constant(mean, std) {
        return Err(PatternError::ConstantSeries {
            n: values.len(),
            value: first,
        });
    }
    Ok(values.iter().map(|&x| (x - mean) / std).collect())
}
