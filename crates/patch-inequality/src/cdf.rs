//! Empirical cumulative distribution

use ordered_float::OrderedFloat;
use patch_core::{to_f64_vec, Numeric};

/// Sorted values and their empirical CDF
///
/// `cdf[i] = i / n`: the fraction of the sample strictly before position
/// `i` of the sorted values, so the curve starts at 0 and stays below 1.
///
/// # Examples
///
/// ```rust
/// use patch_inequality::empirical_cdf;
///
/// let (values, cdf) = empirical_cdf(&[3u32, 1, 2, 2]);
/// assert_eq!(values, vec![1.0, 2.0, 2.0, 3.0]);
/// assert_eq!(cdf, vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn empirical_cdf<T: Numeric>(sample: &[T]) -> (Vec<f64>, Vec<f64>) {
    let mut sorted = to_f64_vec(sample);
    sorted.sort_by_key(|&v| OrderedFloat(v));
    let n = sorted.len() as f64;
    let cdf = (0..sorted.len()).map(|i| i as f64 / n).collect();
    (sorted, cdf)
}
