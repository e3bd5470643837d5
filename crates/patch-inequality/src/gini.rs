//! Gini coefficient
//!
//! With all weights equal to one, the mean-difference form of the Gini
//! coefficient reduces to a closed form over the cumulative sum of the
//! sorted sample:
//!
//! ```text
//! G = (n + 1 - 2 * Σ cumsum / cumsum[n-1]) / n
//! ```
//!
//! 0 means perfect equality; the maximum for `n` values, all but one zero,
//! is `(n - 1) / n`.

use ordered_float::OrderedFloat;
use patch_core::{to_f64_vec, Numeric};

/// Gini coefficient of a non-negative sample
///
/// The statistic is undefined, and NaN is returned, when the sample is empty
/// or sums to zero (e.g. a graph whose nodes all have degree zero). Negative
/// values are outside the domain of the statistic and give meaningless
/// results.
///
/// # Examples
///
/// ```rust
/// use patch_inequality::gini;
///
/// assert_eq!(gini(&[3u32, 3, 3]), 0.0);
/// assert_eq!(gini(&[0.0, 1.0]), 0.5);
/// assert!(gini(&[0u32, 0, 0]).is_nan());
/// ```
pub fn gini<T: Numeric>(sample: &[T]) -> f64 {
    let mut sorted = to_f64_vec(sample);
    sorted.sort_by_key(|&v| OrderedFloat(v));
    gini_sorted(&sorted)
}

/// Gini coefficient of a sample already sorted ascending
pub fn gini_sorted(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let n = sorted.len() as f64;
    let mut cumsum = 0.0;
    let mut cumsum_total = 0.0;
    for &value in sorted {
        cumsum += value;
        cumsum_total += cumsum;
    }
    // cumsum == 0 leaves 0/0 = NaN in place
    (n + 1.0 - 2.0 * cumsum_total / cumsum) / n
}
