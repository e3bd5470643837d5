//! Rank-based stochastic dominance effect sizes
//!
//! This crate quantifies how the attribute distributions of two (or more)
//! groups differ, without assuming anything about their shape.
//!
//! # Supported Effect Sizes
//!
//! - **A12 / Common Language Effect Size**: probability that a random value
//!   of one sample exceeds a random value of the other, ties counted half
//! - **Stochastic dominance delta**: `2 × A12 - 1`, signed, in `[-1, 1]`
//! - **Group dominance**: one-vs-rest and pairwise deltas for N groups
//!
//! Empty samples make every statistic undefined: the result is NaN and it is
//! returned, never replaced.
//!
//! # Examples
//!
//! ```rust
//! use patch_effect::{common_language_a12, one_vs_rest};
//!
//! let minority = vec![1u32, 2, 2, 5];
//! let majority = vec![2u32, 3, 3, 4, 6];
//!
//! let a12 = common_language_a12(&minority, &majority);
//! assert!(a12 < 0.5);
//!
//! let deltas = one_vs_rest(&[minority, majority]).unwrap();
//! assert!((deltas[0] + deltas[1]).abs() < 1e-12);
//! ```

mod cles;
mod delta;
mod dominance;
mod ranks;
mod traits;
mod types;

// Re-exports
pub use cles::{
    a12_confidence_interval, common_language_a12, common_language_delta, mann_whitney_u,
    CommonLanguageEffectSize,
};
pub use delta::DominanceDelta;
pub use dominance::{one_vs_rest, GroupDominance};
pub use ranks::{average_ranks, rank_sum};
pub use traits::NonParametricEffectSize;
pub use types::{EffectSize, EffectSizeInterpretation, EffectSizeType};

// Convenience constructors
pub fn cles() -> CommonLanguageEffectSize {
    CommonLanguageEffectSize::new()
}

pub fn dominance_delta() -> DominanceDelta {
    DominanceDelta::new()
}
