//! Edge-mixing (EI) segregation indices
//!
//! Every edge is classified by the groups of its endpoints as
//! minority–minority (`mm`), majority–majority (`MM`) or cross-group (`mM`).
//! Two index variants are provided:
//!
//! - **Overall** (variant A): `(mM - h) / (mM + h)` with `h = mm + MM`
//! - **Per group** (variant B): the minority index, the majority index and
//!   the overall index
//!
//! Zero denominators yield NaN.

mod ei;

pub use ei::{mixing_indices, EdgeCounts, EiIndices, MixingIndices, MixingVariant};
