use crate::error::{FilterError, Result};
use crate::signal_processing::DesignMethod;
use std::f64::consts::PI;

/// Window shapes available to the windowed-sinc designer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Triangular window, `1 - |2x|`
    Bartlett,
    /// `0.54 + 0.46·cos(2πx)`
    Hamming,
    /// `0.5 + 0.5·cos(2πx)`
    Hann,
}

impl WindowKind {
    /// Weight at one normalized position (`x` in `[-0.5, 0.5]`)
    pub fn weight(self, x: f64) -> f64 {
        match self {
            WindowKind::Bartlett => 1.0 - (2.0 * x).abs(),
            WindowKind::Hamming => 0.54 + 0.46 * (2.0 * PI * x).cos(),
            WindowKind::Hann => 0.5 + 0.5 * (2.0 * PI * x).cos(),
        }
    }
}

impl TryFrom<DesignMethod> for WindowKind {
    type Error = FilterError;

    fn try_from(method: DesignMethod) -> Result<Self> {
        match method {
            DesignMethod::Bartlett => Ok(WindowKind::Bartlett),
            DesignMethod::Hamming => Ok(WindowKind::Hamming),
            DesignMethod::Hann => Ok(WindowKind::Hann),
            other => Err(FilterError::UnsupportedDesign(format!(
                "{} is not a window design",
                other
            ))),
        }
    }
}

/// Apply a window pointwise to a grid of normalized positions
pub fn window(kind: WindowKind, positions: &[f64]) -> Vec<f64> {
    positions.iter().map(|&x| kind.weight(x)).collect()
}

/// Symmetric sample grid of `num_taps` positions with step `1/num_taps`
///
/// Odd counts are centered on zero; even counts are offset by half a step so
/// no point falls on zero. Both cases start at `-(num_taps - 1) / (2·num_taps)`.
pub fn position_grid(num_taps: usize) -> Vec<f64> {
    let n = num_taps as f64;
    let center = (n - 1.0) / 2.0;
    (0..num_taps).map(|i| (i as f64 - center) / n).collect()
}
