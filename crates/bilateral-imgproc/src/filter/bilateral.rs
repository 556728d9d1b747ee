//! Bilateral filtering (edge-preserving smoothing).
//!
//! Every output pixel is a weighted average of its neighborhood. The weight of a neighbor is the
//! product of a spatial weight, which depends on its offset from the center pixel, and a range
//! weight, which depends on the absolute intensity difference to the center pixel. Neighbors
//! across a strong edge get a range weight close to zero, so edges survive the smoothing.
//!
//! The input is padded by replicating its outermost rows and columns, so pixels near the border
//! see a full neighborhood. The neighborhood of a pixel spans the offsets `[-pad, pad)` in both
//! directions, with `pad = kernel_size / 2`.

use bilateral_image::{ops, Image, ImageError};

use super::kernels::{self, RangeKernel, SpatialKernel};
use crate::padding;
use crate::parallel::{self, ExecutionStrategy};
use crate::FilterError;

fn check_format<const C: usize>() -> Result<(), FilterError> {
    if C != 1 {
        return Err(FilterError::UnsupportedFormat { channels: C });
    }
    Ok(())
}

/// Apply the bilateral filter to a grayscale image.
///
/// # Arguments
///
/// * `src` - The source image, single-channel 8-bit.
/// * `dst` - The destination image, same size as `src`.
/// * `kernel_size` - Side of the square neighborhood. Even sizes build the next odd spatial kernel.
/// * `sigma_space` - Standard deviation of the spatial Gaussian.
/// * `sigma_range` - Standard deviation of the range Gaussian, in intensity levels.
///
/// # Errors
///
/// * [`FilterError::UnsupportedFormat`] if `src` has more than one channel. Nothing is computed.
/// * [`FilterError::InvalidParameter`] if `kernel_size` is zero or a sigma is not positive.
/// * [`FilterError::DegenerateKernel`] if the weights of some neighborhood sum to zero, e.g. for
///   `kernel_size == 1` whose neighborhood is empty.
///
/// # Example
///
/// ```
/// use bilateral_image::{Image, ImageSize};
/// use bilateral_imgproc::filter::bilateral_filter;
///
/// let src = Image::<u8, 1>::from_size_val(ImageSize { width: 5, height: 5 }, 100).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// bilateral_filter(&src, &mut dst, 3, 50.0, 50.0).unwrap();
/// assert!(dst.as_slice().iter().all(|&v| v == 100));
/// ```
pub fn bilateral_filter<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: usize,
    sigma_space: f32,
    sigma_range: f32,
) -> Result<(), FilterError> {
    check_format::<C>()?;

    let spatial_kernel = kernels::build_spatial_kernel(kernel_size, sigma_space)?;
    let range_kernel = kernels::build_range_kernel(sigma_range)?;

    bilateral_filter_with_kernels(
        src,
        dst,
        &spatial_kernel,
        Some(&range_kernel),
        ExecutionStrategy::default(),
    )
}

/// Apply the bilateral filter and return a newly allocated output image.
///
/// See [`bilateral_filter`] for the parameters and errors.
pub fn bilateral_filter_gray(
    src: &Image<u8, 1>,
    kernel_size: usize,
    sigma_space: f32,
    sigma_range: f32,
) -> Result<Image<u8, 1>, FilterError> {
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    bilateral_filter(src, &mut dst, kernel_size, sigma_space, sigma_range)?;
    Ok(dst)
}

/// Apply the bilateral filter with prebuilt kernels.
///
/// The neighborhood is derived from the spatial kernel: `pad = spatial_kernel.size() / 2`.
/// Without a range kernel every intensity difference weighs `1.0` and the filter reduces to a
/// plain convolution with the spatial kernel.
///
/// # Arguments
///
/// * `src` - The source image, single-channel 8-bit.
/// * `dst` - The destination image, same size as `src`.
/// * `spatial_kernel` - The spatial weights.
/// * `range_kernel` - The range weights, or `None` for a unit range kernel.
/// * `strategy` - How output rows are distributed over threads.
pub fn bilateral_filter_with_kernels<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    spatial_kernel: &SpatialKernel,
    range_kernel: Option<&RangeKernel>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    check_format::<C>()?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let unit_range = RangeKernel::unit();
    let range_kernel = range_kernel.unwrap_or(&unit_range);

    let width = src.width();
    let height = src.height();
    let pad = spatial_kernel.size() / 2;

    log::debug!(
        "bilateral filter on {}x{} image, kernel {}x{}, {:?}",
        width,
        height,
        spatial_kernel.size(),
        spatial_kernel.size(),
        strategy
    );

    let padded = padding::replicate_border(src, pad)?;
    let padded_width = padded.width();
    let padded_data = padded.as_slice();
    let pad = pad as isize;

    let strategy = if strategy.is_parallel(width * height) {
        strategy
    } else {
        ExecutionStrategy::Serial
    };

    let mut output = Image::<f32, C>::from_size_val(src.size(), 0.0)?;

    parallel::execute_rows(strategy, output.as_slice_mut(), width, |y, out_row| {
        let i = y as isize + pad;
        for (x, out) in out_row.iter_mut().enumerate() {
            let j = x as isize + pad;
            let target = padded_data[i as usize * padded_width + j as usize];

            let mut weighted_sum = 0.0f32;
            let mut weight_total = 0.0f32;

            for m in -pad..pad {
                let row = &padded_data[(i + m) as usize * padded_width..];
                for n in -pad..pad {
                    let neighbor = row[(j + n) as usize];
                    let weight = spatial_kernel.get((m + pad) as usize, (n + pad) as usize)
                        * range_kernel.get(neighbor.abs_diff(target));
                    weighted_sum += neighbor as f32 * weight;
                    weight_total += weight;
                }
            }

            *out = if weight_total > 0.0 {
                weighted_sum / weight_total
            } else {
                f32::NAN
            };
        }
    })?;

    if let Some(idx) = output.as_slice().iter().position(|v| v.is_nan()) {
        return Err(FilterError::DegenerateKernel {
            x: idx % width,
            y: idx / width,
        });
    }

    ops::saturate_cast_u8(&output, dst)?;

    Ok(())
}
