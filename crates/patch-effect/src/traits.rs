//! Core traits for effect size estimation

use crate::types::{EffectSize, EffectSizeType};
use patch_core::Numeric;

/// Trait for non-parametric two-sample effect size estimators
///
/// Estimators never fail: an empty sample yields an [`EffectSize`] whose
/// magnitude is NaN, so the undefined value reaches the caller unmasked.
pub trait NonParametricEffectSize<T: Numeric = f64> {
    /// Compute effect size directly from the data
    fn compute(&self, group1: &[T], group2: &[T]) -> EffectSize;

    /// Only the magnitude of [`compute`](Self::compute)
    fn magnitude(&self, group1: &[T], group2: &[T]) -> f64 {
        self.compute(group1, group2).magnitude
    }

    /// Get the type of effect size this estimator computes
    fn effect_size_type(&self) -> EffectSizeType;

    /// Whether swapping the groups negates the effect
    /// (`effect(A,B) = -effect(B,A)`)
    fn is_antisymmetric(&self) -> bool {
        false
    }
}
