use crate::constants::MIN_DC_GAIN;
use crate::error::{FilterError, Result};

/// Multiply two equal-length vectors element by element
///
/// # Errors
/// Returns `FilterError::DimensionMismatch` if the lengths differ
pub fn elementwise_product(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(FilterError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// Scale taps in place so they sum to one (unity gain at DC)
///
/// # Errors
/// Returns `FilterError::InvalidParameter` if the taps sum to (nearly) zero
/// or to a non-finite value
pub fn normalize_dc_gain(taps: &mut [f64]) -> Result<()> {
    let sum: f64 = taps.iter().sum();
    if !sum.is_finite() || sum.abs() < MIN_DC_GAIN {
        return Err(FilterError::InvalidParameter(format!(
            "cannot normalize taps with DC gain {}",
            sum
        )));
    }
    for tap in taps.iter_mut() {
        *tap /= sum;
    }
    Ok(())
}

/// Normalized sinc, `sin(t)/t` with the removable singularity filled in
pub fn sinc(t: f64) -> f64 {
    if t == 0.0 { 1.0 } else { t.sin() / t }
}
