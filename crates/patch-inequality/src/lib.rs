//! Concentration statistics for attribute distributions
//!
//! - [`gini`]: Gini coefficient of a non-negative sample (NaN when the
//!   sample is empty or sums to zero)
//! - [`empirical_cdf`]: sorted values with their empirical CDF

mod cdf;
mod gini;

pub use cdf::empirical_cdf;
pub use gini::{gini, gini_sorted};
