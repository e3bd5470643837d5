//! Rank helpers for rank-sum statistics

use ordered_float::OrderedFloat;
use patch_core::Numeric;

/// 1-based ranks of `values`, ties receiving the average of their ranks
///
/// # Examples
///
/// ```rust
/// use patch_effect::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
/// ```
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(values[i]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let value = OrderedFloat(values[order[start]]);
        let mut end = start + 1;
        while end < order.len() && OrderedFloat(values[order[end]]) == value {
            end += 1;
        }
        // positions start..end share the ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Sum of the ranks of `x` within the pooled ranking of `x ∪ y`
pub fn rank_sum<T: Numeric>(x: &[T], y: &[T]) -> f64 {
    let pooled: Vec<f64> = x.iter().chain(y.iter()).map(|&v| v.as_f64()).collect();
    average_ranks(&pooled)[..x.len()].iter().sum()
}
