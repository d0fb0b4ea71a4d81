use std::f64::consts::PI;

/// Generate a sine tone
///
/// `freq_hz` and `sample_rate` share the same unit, so passing a sample rate
/// of 1.0 gives a tone at a normalized frequency.
pub fn generate_tone(freq_hz: f64, sample_rate: f64, num_samples: usize, amplitude: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

/// Generate a unit-sample impulse of the given amplitude at `index`
///
/// An index past the end yields an all-zero signal.
pub fn generate_impulse(num_samples: usize, index: usize, amplitude: f64) -> Vec<f64> {
    let mut signal = vec![0.0; num_samples];
    if let Some(sample) = signal.get_mut(index) {
        *sample = amplitude;
    }
    signal
}

/// Root-mean-square level of a signal (0 for an empty signal)
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
}
