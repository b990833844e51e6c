use std::fmt::Debug;

/// T values are float numbers
pub trait Float: ::num::Float + Debug + Default + Send + Sync {}

impl<T: ::num::Float + Debug + Default + Send + Sync> Float for T {}

/// Lossless-enough conversion of a counter into the float type used for accumulation.
#[inline(always)]
pub fn count<T: Float>(value: usize) -> T {
    // Primitive floats represent any usize (possibly rounded)
    <T as ::num::NumCast>::from(value).unwrap_or_else(T::infinity)
}
