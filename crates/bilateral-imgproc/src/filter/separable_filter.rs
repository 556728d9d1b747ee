use bilateral_image::{Image, ImageError};

use crate::padding::PaddingMode;
use crate::parallel::{self, ExecutionStrategy};
use crate::FilterError;

/// Precomputed offsets of a 1D kernel relative to its center tap.
fn kernel_offsets(kernel: &[f32]) -> Vec<isize> {
    let half = kernel.len() as isize / 2;
    (0..kernel.len() as isize).map(|i| i - half).collect()
}

/// Apply a separable filter to an image.
///
/// The horizontal kernel runs first into a temporary buffer, then the vertical kernel. Samples
/// outside the image are taken from the nearest border pixel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn separable_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(FilterError::InvalidParameter(
            "separable kernels must not be empty".to_string(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let strategy = if ExecutionStrategy::default().is_parallel(rows * cols) {
        ExecutionStrategy::ParallelRows
    } else {
        ExecutionStrategy::Serial
    };

    let offsets_x = kernel_offsets(kernel_x);
    let offsets_y = kernel_offsets(kernel_y);
    let border = PaddingMode::Replicate;
    let stride = cols * C;

    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];

    // horizontal
    parallel::execute_rows(strategy, &mut temp, stride, |r, temp_row| {
        let src_row = &src_data[r * stride..(r + 1) * stride];
        for c in 0..cols {
            let mut acc = [0.0f32; C];
            for (&k, &off) in kernel_x.iter().zip(offsets_x.iter()) {
                let x = border.map_index(c as isize + off, cols);
                for (ch, acc_val) in acc.iter_mut().enumerate() {
                    *acc_val += src_row[x * C + ch] * k;
                }
            }
            temp_row[c * C..(c + 1) * C].copy_from_slice(&acc);
        }
    })?;

    // vertical
    parallel::execute_rows(strategy, dst.as_slice_mut(), stride, |r, dst_row| {
        dst_row.fill(0.0);
        for (&k, &off) in kernel_y.iter().zip(offsets_y.iter()) {
            let y = border.map_index(r as isize + off, rows);
            let temp_row = &temp[y * stride..(y + 1) * stride];
            dst_row
                .iter_mut()
                .zip(temp_row.iter())
                .for_each(|(d, &t)| *d += t * k);
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilateral_image::ImageSize;

    #[test]
    fn test_separable_filter_identity() -> Result<(), FilterError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        separable_filter(&src, &mut dst, &[0.0, 1.0, 0.0], &[1.0])?;
        assert_eq!(dst.as_slice(), src.as_slice());
        Ok(())
    }

    #[test]
    fn test_separable_filter_replicates_border() -> Result<(), FilterError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0.0, 3.0, 6.0],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let box3 = [1.0 / 3.0; 3];
        separable_filter(&src, &mut dst, &box3, &box3)?;

        let expected = [1.0f32, 3.0, 5.0];
        for (&d, &e) in dst.as_slice().iter().zip(expected.iter()) {
            approx::assert_relative_eq!(d, e, max_relative = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_separable_filter_size_mismatch() -> Result<(), FilterError> {
        let src = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([2, 3].into(), 0.0)?;
        let res = separable_filter(&src, &mut dst, &[1.0], &[1.0]);
        assert!(matches!(res, Err(FilterError::Image(_))));
        Ok(())
    }
}
