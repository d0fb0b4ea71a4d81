use crate::error::Result;
use crate::signal_processing::fir_design::{FilterCoefficients, design};
use crate::signal_processing::{
    Convolver, DesignMethod, DesignRequest, DirectConvolver, FilterStructure,
};

/// Block-oriented FIR filter that carries its state between calls
///
/// Holds the tap coefficients and a history of the last `num_taps - 1` input
/// samples. Each `apply` prepends the history to the new block, convolves
/// with the taps, and keeps only the outputs that line up with the block, so
/// a signal filtered in pieces matches the same signal filtered in one call.
///
/// Not synchronized: use one instance per independent stream.
pub struct StreamingFilter<C: Convolver<f64> = DirectConvolver> {
    coefficients: FilterCoefficients,
    history: Vec<f64>,
    convolver: C,
}

impl StreamingFilter<DirectConvolver> {
    /// Create a moving-average filter with `initial_taps` taps
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if `initial_taps` is zero
    pub fn new(initial_taps: usize) -> Result<Self> {
        Self::with_convolver(initial_taps, DirectConvolver)
    }
}

impl<C: Convolver<f64>> StreamingFilter<C> {
    /// Create a moving-average filter that convolves with `convolver`
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if `initial_taps` is zero
    pub fn with_convolver(initial_taps: usize, convolver: C) -> Result<Self> {
        let coefficients = design(&DesignRequest::moving_average(initial_taps))?;
        Ok(Self {
            history: vec![0.0; coefficients.num_taps() - 1],
            coefficients,
            convolver,
        })
    }

    /// Replace the filter with a new design and clear the history
    ///
    /// # Arguments
    /// * `num_num` - Number of numerator taps (at least 1)
    /// * `num_den` - Number of denominator taps (only 0 is supported)
    /// * `method` - Design method
    /// * `bandwidth` - Normalized bandwidth for windowed-sinc designs
    ///
    /// # Errors
    /// - `FilterError::InvalidParameter` if `num_num` is zero or the bandwidth is unusable
    /// - `FilterError::UnsupportedDesign` if `num_den` is non-zero
    ///
    /// The filter is left untouched when an error is returned.
    pub fn design_filter(
        &mut self,
        num_num: usize,
        num_den: usize,
        method: DesignMethod,
        bandwidth: f64,
    ) -> Result<()> {
        self.design_from_request(&DesignRequest {
            method,
            numerator_taps: num_num,
            denominator_taps: num_den,
            bandwidth,
        })
    }

    /// Replace the filter with the design described by `request`
    pub fn design_from_request(&mut self, request: &DesignRequest) -> Result<()> {
        let coefficients = design(request)?;
        self.history = vec![0.0; coefficients.num_taps() - 1];
        self.coefficients = coefficients;
        Ok(())
    }

    /// Filter one block, returning as many samples as were given
    ///
    /// An empty block returns an empty vector and leaves the state alone.
    pub fn apply(&mut self, block: &[f64]) -> Result<Vec<f64>> {
        if block.is_empty() {
            return Ok(Vec::new());
        }

        let history_len = self.history.len();
        let mut combined = Vec::with_capacity(history_len + block.len());
        combined.extend_from_slice(&self.history);
        combined.extend_from_slice(block);

        let full = self
            .convolver
            .convolve(&combined, self.coefficients.numerator())?;

        // Outputs before history_len belong to samples already emitted
        let output = full[history_len..history_len + block.len()].to_vec();
        self.history.copy_from_slice(&combined[block.len()..]);

        log::trace!(
            "Filtered block of {} samples with {} taps",
            block.len(),
            self.num_taps()
        );

        Ok(output)
    }

    /// Filter an `f32` buffer in place
    pub fn process_buffer(&mut self, buffer: &mut [f32]) -> Result<()> {
        let block: Vec<f64> = buffer.iter().map(|&s| s as f64).collect();
        let output = self.apply(&block)?;
        for (sample, filtered) in buffer.iter_mut().zip(output) {
            *sample = filtered as f32;
        }
        Ok(())
    }

    /// Get access to the tap coefficients
    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.numerator()
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.coefficients.num_taps()
    }

    /// Input samples carried into the next block, oldest first
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn method(&self) -> DesignMethod {
        self.coefficients.method()
    }

    pub fn structure(&self) -> FilterStructure {
        self.coefficients.structure()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.num_taps() - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::signal_processing::ParallelConvolver;
    use std::f64::consts::PI;
    use std::sync::Arc;

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| ((i * 37) % 11) as f64 - 5.0).collect()
    }

    fn filter_in_blocks<C: Convolver<f64>>(
        filter: &mut StreamingFilter<C>,
        signal: &[f64],
        block_sizes: &[usize],
    ) -> Vec<f64> {
        let mut output = Vec::with_capacity(signal.len());
        let mut start = 0;
        let mut sizes = block_sizes.iter().cycle();
        while start < signal.len() {
            let end = (start + sizes.next().unwrap()).min(signal.len());
            output.extend(filter.apply(&signal[start..end]).unwrap());
            start = end;
        }
        output
    }

    fn tone_rms_db(filter: &mut StreamingFilter, freq: f64, skip: usize) -> f64 {
        let input: Vec<f64> = (0..4000).map(|i| (2.0 * PI * freq * i as f64).sin()).collect();
        let output = filter.apply(&input).unwrap();

        let rms = |s: &[f64]| (s.iter().map(|x| x * x).sum::<f64>() / s.len() as f64).sqrt();
        20.0 * (rms(&output[skip..]) / rms(&input[skip..])).log10()
    }

    #[test]
    fn test_single_tap_passthrough() {
        let mut filter = StreamingFilter::new(1).unwrap();
        assert_eq!(filter.apply(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(filter.history().is_empty());
    }

    #[test]
    fn test_new_is_moving_average() {
        let filter = StreamingFilter::new(4).unwrap();
        assert_eq!(filter.coefficients(), &[0.25; 4]);
        assert_eq!(filter.history(), &[0.0; 3]);
        assert_eq!(filter.method(), DesignMethod::MovingAverage);
        assert_eq!(filter.structure(), FilterStructure::Fir);
    }

    #[test]
    fn test_new_rejects_zero_taps() {
        assert!(matches!(
            StreamingFilter::new(0),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_moving_average_ramps_in() {
        let mut filter = StreamingFilter::new(2).unwrap();
        let output = filter.apply(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(output, vec![1.0, 3.0, 5.0]);
        assert_eq!(filter.history(), &[6.0]);

        let output = filter.apply(&[8.0]).unwrap();
        assert_eq!(output, vec![7.0]);
    }

    #[test]
    fn test_block_split_matches_single_call() {
        let signal = ramp(200);

        let mut reference = StreamingFilter::new(1).unwrap();
        reference
            .design_filter(17, 0, DesignMethod::Hamming, 0.3)
            .unwrap();
        let expected = reference.apply(&signal).unwrap();

        for block_sizes in [vec![1], vec![3, 50, 2], vec![16], vec![17, 1, 40], vec![199]] {
            let mut filter = StreamingFilter::new(1).unwrap();
            filter.design_filter(17, 0, DesignMethod::Hamming, 0.3).unwrap();
            let output = filter_in_blocks(&mut filter, &signal, &block_sizes);

            assert_eq!(output.len(), expected.len());
            for (i, (a, b)) in output.iter().zip(expected.iter()).enumerate() {
                assert!(
                    (a - b).abs() < 1e-12,
                    "blocks {:?} differ at {}: {} vs {}",
                    block_sizes,
                    i,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_empty_block_keeps_state() {
        let mut filter = StreamingFilter::new(3).unwrap();
        filter.apply(&[1.0, 2.0, 3.0]).unwrap();
        let history = filter.history().to_vec();

        assert!(filter.apply(&[]).unwrap().is_empty());
        assert_eq!(filter.history(), history.as_slice());
    }

    #[test]
    fn test_design_resets_history() {
        let mut filter = StreamingFilter::new(3).unwrap();
        filter.apply(&[5.0, 6.0, 7.0]).unwrap();
        assert_eq!(filter.history(), &[6.0, 7.0]);

        filter.design_filter(9, 0, DesignMethod::Hann, 0.25).unwrap();
        assert_eq!(filter.num_taps(), 9);
        assert_eq!(filter.history(), &[0.0; 8]);
        assert_eq!(filter.method(), DesignMethod::Hann);
        assert_eq!(filter.group_delay_samples(), 4);
    }

    #[test]
    fn test_rejected_design_leaves_filter_untouched() {
        let mut filter = StreamingFilter::new(3).unwrap();
        filter.apply(&[1.0, 4.0, 9.0]).unwrap();
        let taps = filter.coefficients().to_vec();
        let history = filter.history().to_vec();

        let err = filter.design_filter(0, 0, DesignMethod::Hamming, 0.2);
        assert!(matches!(err, Err(FilterError::InvalidParameter(_))));

        let err = filter.design_filter(11, 2, DesignMethod::Hamming, 0.2);
        assert!(matches!(err, Err(FilterError::UnsupportedDesign(_))));

        let err = filter.design_filter(11, 0, DesignMethod::Bartlett, -1.0);
        assert!(matches!(err, Err(FilterError::InvalidParameter(_))));

        assert_eq!(filter.coefficients(), taps.as_slice());
        assert_eq!(filter.history(), history.as_slice());
        assert_eq!(filter.method(), DesignMethod::MovingAverage);
    }

    #[test]
    fn test_parallel_convolver_matches_direct() {
        let signal = ramp(300);
        let pool = Arc::new(ParallelConvolver::new(3).unwrap());

        let mut direct = StreamingFilter::new(1).unwrap();
        let mut pooled = StreamingFilter::with_convolver(1, Arc::clone(&pool)).unwrap();
        direct.design_filter(31, 0, DesignMethod::Bartlett, 0.15).unwrap();
        pooled.design_filter(31, 0, DesignMethod::Bartlett, 0.15).unwrap();

        let expected = filter_in_blocks(&mut direct, &signal, &[64]);
        let output = filter_in_blocks(&mut pooled, &signal, &[7, 64, 13]);

        for (a, b) in output.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_process_buffer_in_place() {
        let mut filter = StreamingFilter::new(2).unwrap();
        let mut buffer = [2.0f32, 4.0, 6.0];
        filter.process_buffer(&mut buffer).unwrap();
        assert_eq!(buffer, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_lowpass_passes_low_frequency() {
        let mut filter = StreamingFilter::new(1).unwrap();
        filter.design_filter(63, 0, DesignMethod::Hamming, 0.2).unwrap();

        let attenuation_db = tone_rms_db(&mut filter, 0.02, 200);
        assert!(
            attenuation_db > -1.0,
            "Passband tone too attenuated: {} dB",
            attenuation_db
        );
    }

    #[test]
    fn test_lowpass_attenuates_high_frequency() {
        let mut filter = StreamingFilter::new(1).unwrap();
        filter.design_filter(63, 0, DesignMethod::Hamming, 0.2).unwrap();

        let attenuation_db = tone_rms_db(&mut filter, 0.35, 200);
        assert!(
            attenuation_db < -30.0,
            "Stopband tone not attenuated enough: {} dB",
            attenuation_db
        );
    }
}
