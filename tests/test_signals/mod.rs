#![allow(dead_code)]

use firstream::signal_processing::{Convolver, StreamingFilter};

/// Feed `signal` through `filter` in consecutive blocks of the given sizes
///
/// The sizes must sum to `signal.len()`.
pub fn filter_in_blocks<C: Convolver<f64>>(
    filter: &mut StreamingFilter<C>,
    signal: &[f64],
    block_sizes: &[usize],
) -> Vec<f64> {
    assert_eq!(block_sizes.iter().sum::<usize>(), signal.len());

    let mut output = Vec::with_capacity(signal.len());
    let mut start = 0;
    for &size in block_sizes {
        let block = filter
            .apply(&signal[start..start + size])
            .expect("block filtering failed");
        assert_eq!(block.len(), size);
        output.extend(block);
        start += size;
    }
    output
}

/// Assert two sequences match element-wise within `tolerance`
pub fn assert_all_close(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", context);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "{}: index {} differs, {} vs {}",
            context,
            i,
            a,
            e
        );
    }
}

/// Reference O(N·M) convolution straight from the definition
pub fn naive_convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}
