mod noise;
mod signal;

pub use noise::{generate_white_noise, random_partition};
pub use signal::{generate_impulse, generate_tone, rms};
