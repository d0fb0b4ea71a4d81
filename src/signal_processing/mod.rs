pub mod convolution;
pub mod convolver;
pub mod design_method;
pub mod fir_design;
pub mod math;
pub mod parallel_convolution;
pub mod streaming_filter;
pub mod window;

pub use convolution::{DirectConvolver, Sample, convolve, convolve_output_at};
pub use convolver::Convolver;
pub use design_method::{DesignMethod, DesignRequest, FilterStructure};
pub use fir_design::{FilterCoefficients, design, design_moving_average, design_windowed_sinc};
pub use parallel_convolution::ParallelConvolver;
pub use streaming_filter::StreamingFilter;
pub use window::{WindowKind, position_grid, window};
