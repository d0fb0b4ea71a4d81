use crate::error::{FilterError, Result};
use crate::signal_processing::Convolver;
use num_traits::NumAssign;

/// Numeric element the convolution kernels operate on
///
/// Blanket-implemented for every `Copy` type with the usual arithmetic
/// (`i32`, `i64`, `f32`, `f64`, ...). `Send + Sync + 'static` lets the pooled
/// kernel share operands with its worker threads.
pub trait Sample: NumAssign + Copy + Send + Sync + 'static {}

impl<T> Sample for T where T: NumAssign + Copy + Send + Sync + 'static {}

/// Full linear convolution of two sequences
///
/// Returns `a.len() + b.len() - 1` samples with `out[n] = Σ a[k]·b[n-k]`.
/// The shorter operand drives the inner loop, so the result is independent
/// of argument order (up to floating-point rounding).
///
/// # Errors
/// Returns `FilterError::InvalidInput` if either operand is empty
pub fn convolve<T: Sample>(a: &[T], b: &[T]) -> Result<Vec<T>> {
    check_operands(a.len(), b.len())?;
    let (long, short) = order_operands(a, b);
    let out_len = long.len() + short.len() - 1;

    let mut output = Vec::with_capacity(out_len);
    for n in 0..short.len() {
        output.push(ramp_output(long, short, n));
    }
    for n in short.len()..out_len {
        output.push(steady_output(long, short, n));
    }
    Ok(output)
}

/// Compute the single output sample `n` of `convolve(a, b)`
///
/// # Errors
/// Returns `FilterError::InvalidInput` if either operand is empty or `n` is
/// past the end of the full convolution
pub fn convolve_output_at<T: Sample>(a: &[T], b: &[T], n: usize) -> Result<T> {
    check_operands(a.len(), b.len())?;
    let (long, short) = order_operands(a, b);
    let out_len = long.len() + short.len() - 1;
    if n >= out_len {
        return Err(FilterError::InvalidInput(format!(
            "output index {} out of range for convolution of length {}",
            n, out_len
        )));
    }
    Ok(output_at(long, short, n))
}

/// Output sample `n` for operands already ordered by `order_operands`
#[inline]
pub(crate) fn output_at<T: Sample>(long: &[T], short: &[T], n: usize) -> T {
    debug_assert!(long.len() >= short.len());
    if n < short.len() {
        ramp_output(long, short, n)
    } else {
        steady_output(long, short, n)
    }
}

pub(crate) fn check_operands(a_len: usize, b_len: usize) -> Result<()> {
    if a_len == 0 || b_len == 0 {
        return Err(FilterError::InvalidInput(format!(
            "cannot convolve empty sequence (lengths {} and {})",
            a_len, b_len
        )));
    }
    Ok(())
}

/// Returns `(long, short)`; ties keep `a` as the long operand
pub(crate) fn order_operands<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    if a.len() >= b.len() { (a, b) } else { (b, a) }
}

/// Output index below `short.len()`: overlap grows from index 0.
#[inline]
fn ramp_output<T: Sample>(long: &[T], short: &[T], n: usize) -> T {
    let mut acc = T::zero();
    for (&s, &l) in short[..=n].iter().zip(long[..=n].iter().rev()) {
        acc += s * l;
    }
    acc
}

/// Output index at or past `short.len()`: full overlap, clamped at the tail.
#[inline]
fn steady_output<T: Sample>(long: &[T], short: &[T], n: usize) -> T {
    let first = n.saturating_sub(long.len() - 1);
    let long_window = &long[n + 1 - short.len()..=n - first];

    let mut acc = T::zero();
    for (&s, &l) in short[first..].iter().zip(long_window.iter().rev()) {
        acc += s * l;
    }
    acc
}

/// Sequential reference kernel as a `Convolver`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectConvolver;

impl<T: Sample> Convolver<T> for DirectConvolver {
    fn convolve(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        convolve(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convolve_known_values() {
        assert_eq!(convolve(&[1, 2], &[1, 2]).unwrap(), vec![1, 4, 4]);
        assert_eq!(
            convolve(&[3, 4, 5], &[3, 4, 5]).unwrap(),
            vec![9, 24, 46, 40, 25]
        );
    }

    #[test]
    fn test_convolve_output_length() {
        for (a_len, b_len) in [(1, 1), (1, 7), (7, 1), (5, 3), (3, 5), (16, 16)] {
            let a = vec![1.0f64; a_len];
            let b = vec![1.0f64; b_len];
            assert_eq!(convolve(&a, &b).unwrap().len(), a_len + b_len - 1);
        }
    }

    #[test]
    fn test_convolve_commutative_integers() {
        let a = [2i64, -1, 7, 0, 3, 9, -4];
        let b = [5i64, 1, -2];
        assert_eq!(convolve(&a, &b).unwrap(), convolve(&b, &a).unwrap());
    }

    #[test]
    fn test_convolve_matches_naive_sum() {
        let a: Vec<f64> = (0..11).map(|i| (i as f64 * 0.7).sin()).collect();
        let b: Vec<f64> = (0..4).map(|i| 1.0 / (i as f64 + 1.0)).collect();

        let result = convolve(&a, &b).unwrap();

        for (n, &value) in result.iter().enumerate() {
            let mut expected = 0.0;
            for (k, &ak) in a.iter().enumerate() {
                if n >= k && n - k < b.len() {
                    expected += ak * b[n - k];
                }
            }
            assert!(
                (value - expected).abs() < 1e-12,
                "index {}: {} != {}",
                n,
                value,
                expected
            );
        }
    }

    #[test]
    fn test_convolve_single_precision() {
        let result = convolve(&[0.5f32, 0.5], &[2.0f32, 4.0, 6.0]).unwrap();
        assert_eq!(result, vec![1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn test_convolve_identity_kernel() {
        let signal = [1.5, -2.0, 3.25, 0.0, 8.0];
        assert_eq!(convolve(&signal, &[1.0]).unwrap(), signal.to_vec());
        assert_eq!(convolve(&[1.0], &signal).unwrap(), signal.to_vec());
    }

    #[test]
    fn test_convolve_rejects_empty() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            convolve(&empty, &[1.0]),
            Err(FilterError::InvalidInput(_))
        ));
        assert!(matches!(
            convolve(&[1.0], &empty),
            Err(FilterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_output_at_matches_full_convolution() {
        let long = [1i32, 2, 3, 4, 5, 6];
        let short = [1i32, -1, 2];
        let full = convolve(&long, &short).unwrap();
        for (n, &expected) in full.iter().enumerate() {
            assert_eq!(output_at(&long, &short, n), expected);
            assert_eq!(convolve_output_at(&short, &long, n).unwrap(), expected);
        }
    }

    #[test]
    fn test_output_at_orders_operands() {
        assert_eq!(convolve_output_at(&[1.0], &[1.0, 2.0, 3.0], 2).unwrap(), 3.0);
        assert_eq!(convolve_output_at(&[1.0, 2.0, 3.0], &[1.0], 0).unwrap(), 1.0);
    }

    #[test]
    fn test_output_at_rejects_bad_index() {
        assert!(matches!(
            convolve_output_at(&[1.0], &[1.0, 2.0, 3.0], 3),
            Err(FilterError::InvalidInput(_))
        ));
        let empty: [i32; 0] = [];
        assert!(matches!(
            convolve_output_at(&empty, &[1], 0),
            Err(FilterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_direct_convolver() {
        let convolver = DirectConvolver;
        let result = Convolver::<i32>::convolve(&convolver, &[1, 1], &[1, 1]).unwrap();
        assert_eq!(result, vec![1, 2, 1]);
    }
}
