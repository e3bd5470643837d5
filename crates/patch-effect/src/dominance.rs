//! Stochastic dominance across N groups
//!
//! Statistical disparity for groups of individuals, each group given as the
//! sample of an attribute (degree, wealth). See Vargha & Delaney
//! (doi:10.2307/1165329, p. 22) on stochastic homogeneity.

use crate::{DominanceDelta, NonParametricEffectSize};
use patch_core::{Error, Numeric, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-group dominance of one group against the others
///
/// Uses [`DominanceDelta`] by default; any non-parametric estimator can be
/// plugged in (e.g. [`CommonLanguageEffectSize`](crate::CommonLanguageEffectSize)
/// to get A12 values instead of deltas).
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupDominance<E = DominanceDelta> {
    estimator: E,
}

impl GroupDominance<DominanceDelta> {
    pub fn new() -> Self {
        Self {
            estimator: DominanceDelta,
        }
    }
}

impl<E> GroupDominance<E> {
    /// Use a different two-sample estimator
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    /// Effect of each group against the pooled remainder
    ///
    /// Entry `i` is `effect(groups[i], concat(groups[j] for j != i))`. With
    /// the default delta, a positive entry means group `i` stochastically
    /// dominates the rest. Empty groups yield NaN entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] for fewer than two groups.
    pub fn one_vs_rest<T, S>(&self, groups: &[S]) -> Result<Vec<f64>>
    where
        T: Numeric,
        S: AsRef<[T]> + Sync,
        E: NonParametricEffectSize<T> + Sync,
    {
        check_group_count(groups.len())?;

        let effect_of = |i: usize| {
            let rest: Vec<T> = groups
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, g)| g.as_ref().iter().copied())
                .collect();
            self.estimator.magnitude(groups[i].as_ref(), &rest)
        };

        #[cfg(feature = "parallel")]
        let effects = (0..groups.len()).into_par_iter().map(effect_of).collect();
        #[cfg(not(feature = "parallel"))]
        let effects = (0..groups.len()).map(effect_of).collect();

        Ok(effects)
    }

    /// Matrix of pairwise effects, `m[i][j] = effect(groups[i], groups[j])`
    ///
    /// With the default delta the matrix is antisymmetric with a zero
    /// diagonal for non-empty groups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] for fewer than two groups.
    pub fn pairwise<T, S>(&self, groups: &[S]) -> Result<Vec<Vec<f64>>>
    where
        T: Numeric,
        S: AsRef<[T]> + Sync,
        E: NonParametricEffectSize<T> + Sync,
    {
        check_group_count(groups.len())?;

        let row_of = |i: usize| {
            groups
                .iter()
                .map(|gj| self.estimator.magnitude(groups[i].as_ref(), gj.as_ref()))
                .collect::<Vec<f64>>()
        };

        #[cfg(feature = "parallel")]
        let matrix = (0..groups.len()).into_par_iter().map(row_of).collect();
        #[cfg(not(feature = "parallel"))]
        let matrix = (0..groups.len()).map(row_of).collect();

        Ok(matrix)
    }
}

/// One-vs-rest dominance deltas with the default estimator
pub fn one_vs_rest<T, S>(groups: &[S]) -> Result<Vec<f64>>
where
    T: Numeric,
    S: AsRef<[T]> + Sync,
{
    GroupDominance::new().one_vs_rest(groups)
}

fn check_group_count(count: usize) -> Result<()> {
    if count < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: count,
        });
    }
    Ok(())
}
