use crate::error::{FilterError, Result};
use crate::signal_processing::math::{elementwise_product, normalize_dc_gain, sinc};
use crate::signal_processing::window::{position_grid, window};
use crate::signal_processing::{DesignMethod, DesignRequest, FilterStructure, WindowKind};
use std::f64::consts::PI;

/// Designed filter coefficients
///
/// Holds the numerator taps together with the method that produced them and
/// the filter structure. The denominator is always empty for `Fir`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    numerator: Vec<f64>,
    method: DesignMethod,
    structure: FilterStructure,
}

impl FilterCoefficients {
    /// Numerator taps, at least one
    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    /// Denominator taps (empty for non-recursive filters)
    pub fn denominator(&self) -> &[f64] {
        &[]
    }

    pub fn method(&self) -> DesignMethod {
        self.method
    }

    pub fn structure(&self) -> FilterStructure {
        self.structure
    }

    pub fn num_taps(&self) -> usize {
        self.numerator.len()
    }

    pub fn into_numerator(self) -> Vec<f64> {
        self.numerator
    }
}

/// Design a filter from a complete request
///
/// # Errors
/// - `FilterError::InvalidParameter` if `numerator_taps` is zero or the
///   bandwidth is unusable for a windowed-sinc design
/// - `FilterError::UnsupportedDesign` if a denominator is requested
pub fn design(request: &DesignRequest) -> Result<FilterCoefficients> {
    check_num_taps(request.numerator_taps)?;
    let structure = FilterStructure::for_denominator(request.denominator_taps)?;

    let numerator = match request.method {
        DesignMethod::MovingAverage => design_moving_average(request.numerator_taps)?,
        method => design_windowed_sinc(
            request.numerator_taps,
            WindowKind::try_from(method)?,
            request.bandwidth,
        )?,
    };

    log::debug!(
        "Designed {} filter: {} taps, bandwidth {}",
        request.method,
        numerator.len(),
        request.bandwidth
    );

    Ok(FilterCoefficients {
        numerator,
        method: request.method,
        structure,
    })
}

/// Moving-average (boxcar) design: `num_taps` taps of `1/num_taps`
///
/// # Errors
/// Returns `FilterError::InvalidParameter` if `num_taps` is zero
pub fn design_moving_average(num_taps: usize) -> Result<Vec<f64>> {
    check_num_taps(num_taps)?;
    Ok(vec![1.0 / num_taps as f64; num_taps])
}

/// Windowed-sinc lowpass design with unity DC gain
///
/// The ideal lowpass response `sin(t)/t`, `t = bandwidth·π·x·num_taps`, is
/// sampled on the symmetric position grid, multiplied by the window and
/// normalized so the taps sum to one.
///
/// # Arguments
/// * `num_taps` - Number of taps (at least 1)
/// * `kind` - Window applied to the ideal response
/// * `bandwidth` - Normalized bandwidth, 0.5 = half the sample rate
///
/// # Errors
/// Returns `FilterError::InvalidParameter` if `num_taps` is zero, the
/// bandwidth is not a positive finite number, or the windowed taps cancel out
pub fn design_windowed_sinc(num_taps: usize, kind: WindowKind, bandwidth: f64) -> Result<Vec<f64>> {
    check_num_taps(num_taps)?;
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "bandwidth must be positive and finite, got {}",
            bandwidth
        )));
    }

    let n = num_taps as f64;
    let grid = position_grid(num_taps);
    let weights = window(kind, &grid);
    let response: Vec<f64> = grid
        .iter()
        .map(|&x| sinc(bandwidth * PI * x * n))
        .collect();

    let mut taps = elementwise_product(&response, &weights)?;
    normalize_dc_gain(&mut taps)?;
    Ok(taps)
}

fn check_num_taps(num_taps: usize) -> Result<()> {
    if num_taps < 1 {
        return Err(FilterError::InvalidParameter(
            "filter needs at least one tap".into(),
        ));
    }
    Ok(())
}
