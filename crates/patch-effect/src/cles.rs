//! Common Language Effect Size (A12)
//!
//! A12 is the probability that a value drawn at random from one sample is
//! larger than a value drawn at random from another, counting ties as one
//! half (Vargha & Delaney, doi:10.2307/1165329).
//!
//! The statistic is computed from the Mann-Whitney rank sum rather than by
//! comparing all pairs, so it costs one sort of the pooled sample.

use crate::ranks::rank_sum;
use crate::{EffectSize, EffectSizeType, NonParametricEffectSize};
use patch_core::{Error, Numeric, Result};

/// Common Language Effect Size (A12) estimator
///
/// A12 = P(X > Y) + ½ P(X = Y), with X from group 1 and Y from group 2.
///
/// The result ranges from 0 to 1:
/// - A12 = 0.5: no difference between groups
/// - A12 > 0.5: group 1 tends to have higher values
/// - A12 < 0.5: group 2 tends to have higher values
///
/// A12 is not symmetric: `A12(x, y) = 1 - A12(y, x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonLanguageEffectSize;

impl CommonLanguageEffectSize {
    /// Create a new A12 estimator
    pub fn new() -> Self {
        Self
    }

    /// Convert A12 to the signed dominance delta
    ///
    /// Relationship: δ = 2 × A12 - 1
    pub fn to_delta(a12: f64) -> f64 {
        2.0 * a12 - 1.0
    }

    /// Convert the signed dominance delta back to A12
    ///
    /// Relationship: A12 = (δ + 1) / 2
    pub fn from_delta(delta: f64) -> f64 {
        (delta + 1.0) / 2.0
    }
}

impl<T: Numeric> NonParametricEffectSize<T> for CommonLanguageEffectSize {
    fn compute(&self, group1: &[T], group2: &[T]) -> EffectSize {
        EffectSize::new(
            common_language_a12(group1, group2),
            EffectSizeType::Probability,
            Some((group1.len(), group2.len())),
        )
    }

    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Probability
    }
}

/// Mann-Whitney U statistic of `x` against `y`
///
/// `U = R - m(m+1)/2` where `R` is the rank sum of `x` in the pooled
/// ranking. NaN if either sample is empty or contains NaN.
pub fn mann_whitney_u<T: Numeric>(x: &[T], y: &[T]) -> f64 {
    if is_undefined(x, y) {
        return f64::NAN;
    }
    let m = x.len() as f64;
    rank_sum(x, y) - 0.5 * m * (m + 1.0)
}

/// A12 of `x` against `y`
///
/// Computed as `(R/m - (m+1)/2) / n`, `R` being the rank sum of `x` in the
/// pooled ranking (ties ranked by their average), `m = |x|`, `n = |y|`.
/// Returns NaN if either sample is empty or contains NaN.
///
/// # Examples
///
/// ```rust
/// use patch_effect::common_language_a12;
///
/// assert_eq!(common_language_a12(&[4.0, 5.0], &[1.0, 2.0]), 1.0);
/// assert_eq!(common_language_a12(&[1.0, 2.0], &[1.0, 2.0]), 0.5);
/// assert!(common_language_a12::<f64>(&[], &[1.0]).is_nan());
/// ```
pub fn common_language_a12<T: Numeric>(x: &[T], y: &[T]) -> f64 {
    if is_undefined(x, y) {
        return f64::NAN;
    }
    let m = x.len() as f64;
    let n = y.len() as f64;
    let r = rank_sum(x, y);
    (r / m - (m + 1.0) / 2.0) / n
}

/// Signed stochastic dominance of `x` over `y`: `2 * A12 - 1`
///
/// Lies in `[-1, 1]`; positive when `x` is stochastically larger.
pub fn common_language_delta<T: Numeric>(x: &[T], y: &[T]) -> f64 {
    CommonLanguageEffectSize::to_delta(common_language_a12(x, y))
}

/// Confidence interval for A12 using the normal approximation
///
/// `Var(A12) = (m + n + 1) / (12 m n)`; bounds are clamped to `[0, 1]`.
pub fn a12_confidence_interval(
    a12: f64,
    m: usize,
    n: usize,
    confidence_level: f64,
) -> Result<(f64, f64)> {
    use statrs::distribution::{ContinuousCDF, Normal};

    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(Error::InvalidInput(
            "Confidence level must be in (0, 1)".to_string(),
        ));
    }
    if m == 0 || n == 0 {
        return Err(Error::empty_input("a12 confidence interval"));
    }

    let m_f = m as f64;
    let n_f = n as f64;
    let variance = (m_f + n_f + 1.0) / (12.0 * m_f * n_f);
    let standard_error = variance.sqrt();

    let normal = Normal::new(0.0, 1.0).map_err(|e| {
        Error::Computation(format!("Failed to create normal distribution: {}", e))
    })?;

    let alpha = 1.0 - confidence_level;
    let z_critical = normal.inverse_cdf(1.0 - alpha / 2.0);

    let margin = z_critical * standard_error;
    let lower = (a12 - margin).max(0.0);
    let upper = (a12 + margin).min(1.0);

    Ok((lower, upper))
}

fn is_undefined<T: Numeric>(x: &[T], y: &[T]) -> bool {
    x.is_empty() || y.is_empty() || x.iter().chain(y.iter()).any(|v| v.as_f64().is_nan())
}
