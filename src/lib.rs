pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::FirstreamConfig;
pub use error::{FilterError, Result};
pub use signal_processing::{
    Convolver, DesignMethod, DirectConvolver, ParallelConvolver, StreamingFilter, convolve,
};
