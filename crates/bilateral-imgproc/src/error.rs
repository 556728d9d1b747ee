use bilateral_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The input is not a single-channel 8-bit image.
    #[error("Unsupported input format: expected a single-channel 8-bit image, got {channels} channels")]
    UnsupportedFormat {
        /// Number of channels of the rejected image.
        channels: usize,
    },

    /// A filter parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The kernel weights around a pixel add up to zero.
    #[error("Degenerate kernel: the weights around pixel ({x}, {y}) sum to zero")]
    DegenerateKernel {
        /// Column of the offending pixel.
        x: usize,
        /// Row of the offending pixel.
        y: usize,
    },

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
