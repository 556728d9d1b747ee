use bilateral_image::Image;

use super::{kernels, separable_filter};
use crate::FilterError;

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y). Even sizes are bumped to the
///   next odd size so the kernel stays centered on the pixel.
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use bilateral_image::{Image, ImageSize};
/// use bilateral_imgproc::filter::gaussian_blur;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 0.5).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// gaussian_blur(&src, &mut dst, (3, 3), (1.0, 1.0)).unwrap();
/// assert!(dst.as_slice().iter().all(|&v| (v - 0.5).abs() < 1e-6));
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), FilterError> {
    if kernel_size.0 == 0 || kernel_size.1 == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "gaussian kernel size must be positive, got {kernel_size:?}"
        )));
    }
    if !(sigma.0 > 0.0 && sigma.1 > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "gaussian sigma must be positive, got {sigma:?}"
        )));
    }

    let kernel_size = (odd_kernel_size(kernel_size.0), odd_kernel_size(kernel_size.1));

    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y)?;
    Ok(())
}

fn odd_kernel_size(size: usize) -> usize {
    if size % 2 == 0 {
        log::debug!("even gaussian kernel size {size}, using {}", size + 1);
        size + 1
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilateral_image::ImageSize;

    #[test]
    fn test_gaussian_blur_smooths_step() -> Result<(), FilterError> {
        #[rustfmt::skip]
        let data = vec![
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
        ];
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 2,
            },
            data,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        gaussian_blur(&src, &mut dst, (3, 3), (1.0, 1.0))?;

        let row = &dst.as_slice()[..4];
        assert!(row[1] > 0.0 && row[1] < 0.5);
        assert!(row[2] > 0.5 && row[2] < 1.0);
        approx::assert_relative_eq!(row[1] + row[2], 1.0, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid() -> Result<(), FilterError> {
        let src = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let mut dst = src.clone();
        assert!(gaussian_blur(&src, &mut dst, (0, 3), (1.0, 1.0)).is_err());
        assert!(gaussian_blur(&src, &mut dst, (3, 3), (0.0, 1.0)).is_err());
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_even_size_keeps_impulse_centered() -> Result<(), FilterError> {
        let mut data = vec![0.0f32; 7];
        data[3] = 9.0;
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 7,
                height: 1,
            },
            data,
        )?;

        for k in [2, 4, 6] {
            let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
            gaussian_blur(&src, &mut dst, (k, 1), (50.0, 1.0))?;

            let mut expected = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
            gaussian_blur(&src, &mut expected, (k + 1, 1), (50.0, 1.0))?;
            assert_eq!(dst, expected, "kernel size {k}");

            let row = dst.as_slice();
            let total: f32 = row.iter().sum();
            let centroid = row
                .iter()
                .enumerate()
                .map(|(x, &v)| x as f32 * v)
                .sum::<f32>()
                / total;
            approx::assert_relative_eq!(centroid, 3.0, max_relative = 1e-5);
        }
        Ok(())
    }
}
