use crate::error::{FilterError, Result};
use std::fmt;
use std::str::FromStr;

/// FIR design method
///
/// # Parsing formats
/// - `moving-average`, `moving_average`, `boxcar`
/// - `bartlett`, `hamming`, `hann` (case insensitive)
///
/// # Example
/// ```
/// use firstream::signal_processing::DesignMethod;
///
/// let method: DesignMethod = "Hamming".parse().unwrap();
/// assert_eq!(method, DesignMethod::Hamming);
/// assert!("kaiser".parse::<DesignMethod>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DesignMethod {
    /// Boxcar average, every tap `1/N`
    #[default]
    MovingAverage,
    /// Windowed sinc with a triangular window
    Bartlett,
    /// Windowed sinc with a Hamming window
    Hamming,
    /// Windowed sinc with a Hann window
    Hann,
}

impl fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DesignMethod::MovingAverage => "moving-average",
            DesignMethod::Bartlett => "bartlett",
            DesignMethod::Hamming => "hamming",
            DesignMethod::Hann => "hann",
        };
        f.write_str(name)
    }
}

impl FromStr for DesignMethod {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moving-average" | "moving_average" | "movingaverage" | "boxcar" => {
                Ok(DesignMethod::MovingAverage)
            }
            "bartlett" => Ok(DesignMethod::Bartlett),
            "hamming" => Ok(DesignMethod::Hamming),
            "hann" | "hanning" => Ok(DesignMethod::Hann),
            _ => Err(FilterError::UnsupportedDesign(format!(
                "unknown design method: {}",
                s
            ))),
        }
    }
}

/// Structure of a designed filter
///
/// Only non-recursive (FIR) filters are built today. A recursive variant
/// carrying denominator taps would be added here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FilterStructure {
    /// Numerator taps only, empty denominator
    #[default]
    Fir,
}

impl FilterStructure {
    /// Pick the structure for a requested denominator length
    ///
    /// # Errors
    /// Returns `FilterError::UnsupportedDesign` for any non-zero denominator
    pub fn for_denominator(denominator_taps: usize) -> Result<Self> {
        match denominator_taps {
            0 => Ok(FilterStructure::Fir),
            n => Err(FilterError::UnsupportedDesign(format!(
                "recursive filters are not supported ({} denominator taps requested)",
                n
            ))),
        }
    }

    /// Number of denominator taps this structure carries
    pub fn denominator_taps(&self) -> usize {
        match self {
            FilterStructure::Fir => 0,
        }
    }
}

/// A complete filter design request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignRequest {
    /// Design method
    pub method: DesignMethod,
    /// Number of numerator taps (must be at least 1)
    pub numerator_taps: usize,
    /// Number of denominator taps (only 0 is supported)
    pub denominator_taps: usize,
    /// Normalized bandwidth, 0.5 = half the sample rate; ignored by the moving average
    pub bandwidth: f64,
}

impl DesignRequest {
    /// Moving-average request with `num_taps` taps
    pub fn moving_average(num_taps: usize) -> Self {
        Self {
            method: DesignMethod::MovingAverage,
            numerator_taps: num_taps,
            denominator_taps: 0,
            bandwidth: 0.0,
        }
    }

    /// Windowed-sinc lowpass request
    pub fn windowed_sinc(method: DesignMethod, num_taps: usize, bandwidth: f64) -> Self {
        Self {
            method,
            numerator_taps: num_taps,
            denominator_taps: 0,
            bandwidth,
        }
    }
}
