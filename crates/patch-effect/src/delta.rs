//! Signed stochastic dominance (delta)
//!
//! The delta measures which of two samples tends to be larger:
//! `δ = P(X > Y) - P(X < Y) = 2 × A12 - 1`. It equals Cliff's delta with
//! ties split evenly, and shares its interpretation thresholds.

use crate::cles::common_language_delta;
use crate::{EffectSize, EffectSizeType, NonParametricEffectSize};
use patch_core::Numeric;

/// Stochastic dominance delta estimator
///
/// The result ranges from -1 to +1:
/// - δ = +1: every value of group 1 exceeds every value of group 2
/// - δ = -1: every value of group 2 exceeds every value of group 1
/// - δ = 0: no systematic difference
#[derive(Debug, Clone, Copy, Default)]
pub struct DominanceDelta;

impl DominanceDelta {
    /// Create a new delta estimator
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> NonParametricEffectSize<T> for DominanceDelta {
    fn compute(&self, group1: &[T], group2: &[T]) -> EffectSize {
        EffectSize::new(
            common_language_delta(group1, group2),
            EffectSizeType::Dominance,
            Some((group1.len(), group2.len())),
        )
    }

    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Dominance
    }

    fn is_antisymmetric(&self) -> bool {
        true // delta(A,B) = -delta(B,A)
    }
}
