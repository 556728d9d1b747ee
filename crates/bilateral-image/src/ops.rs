use crate::{Image, ImageError};

/// Cast the pixel data of an image to a different type.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use bilateral_image::{Image, ImageSize};
/// use bilateral_image::ops::cast_and_scale;
///
/// let image = Image::<u8, 1>::new(
///  ImageSize {
///   width: 2,
///   height: 1,
///  },
///  vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_f32 = Image::from_size_val(image.size(), 0.0f32).unwrap();
///
/// cast_and_scale(&image, &mut image_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(image_f32.get_pixel(0, 0, 0).unwrap(), 0.0f32);
/// assert_eq!(image_f32.get_pixel(1, 0, 0).unwrap(), 1.0f32);
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: U,
) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = <U as num_traits::NumCast>::from(inp).ok_or(ImageError::CastError(
                std::any::type_name::<U>().to_string(),
            ))?;
            *out = x * scale;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

/// Quantize a floating point image into 8-bit samples.
///
/// Each sample is rounded to the nearest integer, with ties going to the even neighbor, and
/// saturated to `[0, 255]`.
///
/// ```
/// use bilateral_image::{Image, ImageSize};
/// use bilateral_image::ops::saturate_cast_u8;
///
/// let src = Image::<f32, 1>::new(ImageSize { width: 3, height: 1 }, vec![-4.0, 126.5, 300.0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// saturate_cast_u8(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 126, 255]);
/// ```
pub fn saturate_cast_u8<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| *out = inp.round_ties_even().clamp(0.0, 255.0) as u8);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;

    #[test]
    fn cast_and_scale_size_mismatch() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 1)?;
        let mut dst = Image::<f32, 1>::from_size_val(ImageSize { width: 3, height: 2 }, 0.0)?;
        assert_eq!(
            cast_and_scale(&src, &mut dst, 1.0),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn saturate_cast_rounds_and_clamps() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::new(
            ImageSize { width: 7, height: 1 },
            vec![0.49, 0.5, 1.5, 2.5, 254.5, 254.6, f32::NAN],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 7)?;
        saturate_cast_u8(&src, &mut dst)?;
        // NaN saturates to zero with `as` casts
        assert_eq!(dst.as_slice(), &[0, 0, 2, 2, 254, 255, 0]);
        Ok(())
    }
}
