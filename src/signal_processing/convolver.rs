use crate::error::Result;
use crate::signal_processing::Sample;
use std::sync::Arc;

/// Common trait for linear convolution kernels
///
/// Implemented by `DirectConvolver` and `ParallelConvolver`. Both return the
/// full convolution (`a.len() + b.len() - 1` samples) and reject empty operands.
pub trait Convolver<T: Sample> {
    /// Full linear convolution of `a` and `b`
    fn convolve(&self, a: &[T], b: &[T]) -> Result<Vec<T>>;
}

impl<T: Sample, C: Convolver<T> + ?Sized> Convolver<T> for Arc<C> {
    fn convolve(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        (**self).convolve(a, b)
    }
}
