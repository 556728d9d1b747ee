use bilateral_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// A border type for the spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// This border type fills the border with a single, constant value.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,
}

impl PaddingMode {
    /// Maps index `i` to a valid index within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Constant`: returns 0 (not used directly)
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Replicate => i.clamp(0, len as isize - 1) as usize,
            PaddingMode::Constant => 0,
        }
    }

    /// Fills the border of `new_data`, which already holds the original image in its center.
    fn apply_padding<T: Copy + Send + Sync, const C: usize>(
        &self,
        new_data: &mut [T],
        old_width: usize,
        old_height: usize,
        new_width: usize,
        new_height: usize,
        padding: &Padding2D,
    ) {
        if let PaddingMode::Constant = self {
            return;
        }

        let top = padding.top;
        let bottom = padding.bottom;
        let left = padding.left;
        let right = padding.right;
        let row_stride = new_width * C;

        // left and right of the rows holding the original image
        new_data[top * row_stride..(new_height - bottom) * row_stride]
            .par_chunks_exact_mut(row_stride)
            .for_each(|row| {
                for x in (0..left).chain(new_width - right..new_width) {
                    let src_x = self.map_index(x as isize - left as isize, old_width);
                    let src_idx = (left + src_x) * C;
                    row.copy_within(src_idx..src_idx + C, x * C);
                }
            });

        // top
        {
            let (top_section, rest) = new_data.split_at_mut(top * row_stride);

            top_section
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, dst_row)| {
                    let src_y = self.map_index(y as isize - top as isize, old_height);
                    let src_row = &rest[src_y * row_stride..(src_y + 1) * row_stride];
                    dst_row.copy_from_slice(src_row);
                });
        }

        // bottom
        {
            let split_point = (new_height - bottom) * row_stride;
            let (rest, bottom_section) = new_data.split_at_mut(split_point);

            bottom_section
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(idx, dst_row)| {
                    let y = new_height - bottom + idx;
                    let src_y = self.map_index(y as isize - top as isize, old_height);
                    let src_start = (src_y + top) * row_stride;
                    dst_row.copy_from_slice(&rest[src_start..src_start + row_stride]);
                });
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Same amount of padding on all four sides.
    pub fn uniform(pad: usize) -> Self {
        Self {
            top: pad,
            bottom: pad,
            left: pad,
            right: pad,
        }
    }

    /// The image size obtained after applying this padding to `size`.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use bilateral_image::ImageSize;
    /// use bilateral_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Pads `src` into `dst`, centering the original image and filling the border
/// according to `padding_mode`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `padding_mode` - The type of border handling to use.
/// * `constant_value` - The pixel value used for constant padding, one value per channel.
///
/// # Errors
///
/// Returns an error if `src` is empty or if the size of `dst` does not match the padded size of `src`.
///
/// # Example
///
/// ```rust
/// use bilateral_image::{ImageSize, Image};
/// use bilateral_imgproc::padding::{PaddingMode, Padding2D, spatial_padding};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 0).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::uniform(1), PaddingMode::Replicate, [0]).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::ImageDataNotInitialized);
    }

    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let old_width = src.width();
    let old_height = src.height();
    let new_width = dst.width();
    let new_height = dst.height();

    let old_data = src.as_slice();
    let new_data = dst.as_slice_mut();

    if let PaddingMode::Constant = padding_mode {
        new_data
            .chunks_exact_mut(C)
            .for_each(|chunk| chunk.copy_from_slice(&constant_value));
    }

    // copy old image data as center of new image data
    let new_stride = new_width * C;
    let old_stride = old_width * C;
    let row_offset = padding.top * new_stride + padding.left * C;

    for (src_row, dst_row) in old_data
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    padding_mode.apply_padding::<T, C>(
        new_data, old_width, old_height, new_width, new_height, &padding,
    );

    Ok(())
}

/// Allocates and returns a copy of `src` with `pad` replicated border pixels on every side.
pub fn replicate_border<T, const C: usize>(
    src: &Image<T, C>,
    pad: usize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let padding = Padding2D::uniform(pad);
    let mut dst = Image::from_size_val(padding.padded_size(src.size()), T::default())?;
    spatial_padding(src, &mut dst, padding, PaddingMode::Replicate, [T::default(); C])?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_src_2x2() -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )
    }

    fn make_dst_4x4() -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            vec![0u8; 16],
        )
    }

    const PAD_1: Padding2D = Padding2D {
        top: 1,
        bottom: 1,
        left: 1,
        right: 1,
    };

    #[test]
    fn test_spatial_padding_constant() -> Result<(), ImageError> {
        let src = make_src_2x2()?;
        let mut dst = make_dst_4x4()?;

        spatial_padding(&src, &mut dst, PAD_1, PaddingMode::Constant, [9])?;

        #[rustfmt::skip]
        let expected: [u8; 16] = [
            9, 9, 9, 9,
            9, 1, 2, 9,
            9, 3, 4, 9,
            9, 9, 9, 9,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_replicate() -> Result<(), ImageError> {
        let src = make_src_2x2()?;
        let mut dst = make_dst_4x4()?;

        spatial_padding(&src, &mut dst, PAD_1, PaddingMode::Replicate, [0])?;

        #[rustfmt::skip]
        let expected: [u8; 16] = [
            1, 1, 2, 2,
            1, 1, 2, 2,
            3, 3, 4, 4,
            3, 3, 4, 4,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_replicate_rgb() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 1, 1, 2, 2, 2],
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            0,
        )?;

        spatial_padding(&src, &mut dst, PAD_1, PaddingMode::Replicate, [0; 3])?;

        let d = dst.as_slice();
        assert_eq!(&d[0..3], &[1, 1, 1]);
        assert_eq!(&d[9..12], &[2, 2, 2]);
        assert_eq!(&d[33..36], &[2, 2, 2]);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_dst_size_mismatch() -> Result<(), ImageError> {
        let src = make_src_2x2()?;
        let mut dst = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 4,
            },
            vec![0u8; 12],
        )?;

        let res = spatial_padding(&src, &mut dst, PAD_1, PaddingMode::Replicate, [0]);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 4, 4, 4)));

        Ok(())
    }

    #[test]
    fn test_replicate_border_larger_than_image() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![7],
        )?;

        let dst = replicate_border(&src, 3)?;

        assert_eq!(dst.size(), ImageSize { width: 7, height: 7 });
        assert!(dst.as_slice().iter().all(|&v| v == 7));

        Ok(())
    }

    #[test]
    fn test_replicate_border_zero_pad() -> Result<(), ImageError> {
        let src = make_src_2x2()?;
        let dst = replicate_border(&src, 0)?;
        assert_eq!(dst, src);
        Ok(())
    }
}
