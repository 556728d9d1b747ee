use crate::{normalize, FilterError};

/// Number of distinct absolute differences between two 8-bit samples.
pub const RANGE_KERNEL_SIZE: usize = 256;

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size as f32 - 1.0) / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Square table of spatial weights, indexed by the offset from the center pixel.
///
/// Weights are min-max normalized into `[0, 1]`; the center weight is `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialKernel {
    size: usize,
    data: Vec<f32>,
}

impl SpatialKernel {
    /// Side length of the kernel. Always odd.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the center row and column.
    pub fn center(&self) -> usize {
        self.size / 2
    }

    /// Weight at `(row, col)`, both in `[0, size)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.size + col]
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Lookup table of range weights, indexed by the absolute difference of two 8-bit samples.
///
/// Weights are min-max normalized into `[0, 1]` and non-increasing with the difference.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeKernel {
    data: [f32; RANGE_KERNEL_SIZE],
}

impl RangeKernel {
    /// A table where every difference weighs `1.0`.
    ///
    /// Filtering with it ignores intensities and reduces the bilateral filter to a plain spatial
    /// convolution.
    pub fn unit() -> Self {
        Self {
            data: [1.0; RANGE_KERNEL_SIZE],
        }
    }

    /// Weight of the absolute difference `diff`.
    #[inline]
    pub fn get(&self, diff: u8) -> f32 {
        self.data[diff as usize]
    }

    /// The weights indexed by difference.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

fn check_sigma(name: &str, sigma: f32) -> Result<(), FilterError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "{name} must be a positive finite number, got {sigma}"
        )));
    }
    Ok(())
}

/// Build the 2D spatial Gaussian kernel of the bilateral filter.
///
/// An even `size` has no center cell, so it is incremented to the next odd value. Offsets whose
/// squared distance exceeds `size²` are left at zero before normalization. The unnormalized
/// weight is `exp(-(i² + j²) / (2σ²)) / (sqrt(2π)σ)` and the grid is then min-max normalized into
/// `[0, 1]`. A grid without any spread (a single cell) normalizes to all zeros.
///
/// # Arguments
///
/// * `size` - The side length of the kernel, at least 1.
/// * `sigma` - The standard deviation of the Gaussian, strictly positive.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `size` is zero or `sigma` is not positive.
///
/// # Example
///
/// ```
/// use bilateral_imgproc::filter::kernels::build_spatial_kernel;
///
/// let kernel = build_spatial_kernel(4, 1.5).unwrap();
/// assert_eq!(kernel.size(), 5);
/// assert_eq!(kernel.get(2, 2), 1.0);
/// ```
pub fn build_spatial_kernel(size: usize, sigma: f32) -> Result<SpatialKernel, FilterError> {
    if size == 0 {
        return Err(FilterError::InvalidParameter(
            "kernel size must be at least 1".to_string(),
        ));
    }
    check_sigma("sigma_space", sigma)?;

    let shift = (size / 2) as i64;
    let size = if size % 2 == 0 {
        log::debug!("even kernel size {size} rounded up to {}", size + 1);
        size + 1
    } else {
        size
    };

    let sigma = sigma as f64;
    let scale = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * sigma);
    let bound = (size * size) as i64;
    let mut weights = vec![0.0f64; size * size];

    for i in -shift..size as i64 - shift {
        let row = &mut weights[(i + shift) as usize * size..][..size];
        for j in -shift..size as i64 - shift {
            let dist_sq = i * i + j * j;
            if dist_sq > bound {
                continue;
            }
            let val = dist_sq as f64 / (2.0 * sigma * sigma);
            row[(j + shift) as usize] = (-val).exp() * scale;
        }
    }

    normalize::normalize_min_max(&mut weights, 0.0, 1.0)?;

    Ok(SpatialKernel {
        size,
        data: weights.into_iter().map(|w| w as f32).collect(),
    })
}

/// Build the 1D range Gaussian lookup table of the bilateral filter.
///
/// Entry `d` holds `exp(-d² / (2σ²))` for `d` in `0..=255`, min-max normalized into `[0, 1]`.
/// A table without any spread normalizes to all zeros.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `sigma` is not positive.
///
/// # Example
///
/// ```
/// use bilateral_imgproc::filter::kernels::build_range_kernel;
///
/// let kernel = build_range_kernel(30.0).unwrap();
/// assert_eq!(kernel.get(0), 1.0);
/// assert_eq!(kernel.get(255), 0.0);
/// ```
pub fn build_range_kernel(sigma: f32) -> Result<RangeKernel, FilterError> {
    check_sigma("sigma_range", sigma)?;

    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;

    let mut weights = [0.0f64; RANGE_KERNEL_SIZE];
    for (d, w) in weights.iter_mut().enumerate() {
        *w = (-((d * d) as f64) / denom).exp();
    }

    normalize::normalize_min_max(&mut weights, 0.0, 1.0)?;

    let mut data = [0.0f32; RANGE_KERNEL_SIZE];
    data.iter_mut()
        .zip(weights.iter())
        .for_each(|(dst, &w)| *dst = w as f32);

    Ok(RangeKernel { data })
}
