use crate::error::{FilterError, Result};
use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Generate zero-mean Gaussian white noise
///
/// # Errors
/// Returns `FilterError::InvalidParameter` if `std_dev` is negative or not finite
pub fn generate_white_noise(num_samples: usize, std_dev: f64, seed: Option<u64>) -> Result<Vec<f64>> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "noise standard deviation must be finite and non-negative, got {}",
            std_dev
        )));
    }
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| FilterError::InvalidParameter(format!("noise distribution: {}", e)))?;
    let mut rng = create_rng(seed);
    Ok((0..num_samples).map(|_| normal.sample(&mut rng)).collect())
}

/// Split `total` samples into consecutive block sizes between 1 and `max_block`
///
/// The sizes always sum to `total`; an empty vector is returned for `total == 0`.
pub fn random_partition(total: usize, max_block: usize, seed: Option<u64>) -> Vec<usize> {
    let max_block = max_block.max(1) as u64;
    let mut rng = create_rng(seed);
    let mut sizes = Vec::new();
    let mut remaining = total;

    while remaining > 0 {
        let size = (1 + rng.random::<u64>() % max_block) as usize;
        let size = size.min(remaining);
        sizes.push(size);
        remaining -= size;
    }

    sizes
}
