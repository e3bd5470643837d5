//! Numeric sample values
//!
//! Statistics in this workspace take samples of any primitive numeric type
//! (degrees arrive as integers, attributes as floats) and aggregate in `f64`.

use num_traits::ToPrimitive;
use std::fmt::Debug;

/// Base trait for numeric types that can be used as sample values
pub trait Numeric: ToPrimitive + Copy + PartialOrd + Debug + Send + Sync {
    /// Convert to `f64` for aggregation
    ///
    /// Values that cannot be represented map to NaN, which makes any
    /// statistic computed from them undefined rather than silently wrong.
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

macro_rules! impl_numeric {
    ($($t:ty),* $(,)?) => {
        $(impl Numeric for $t {})*
    };
}

impl_numeric!(f64, f32, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Convert a sample to `f64` values
pub fn to_f64_vec<T: Numeric>(sample: &[T]) -> Vec<f64> {
    sample.iter().map(|&x| x.as_f64()).collect()
}
