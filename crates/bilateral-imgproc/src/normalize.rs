//! Min-max normalization of sample buffers.
//!
//! Used to rescale the Gaussian weight tables of the bilateral filter so that the
//! strongest weight is exactly `max` and the weakest exactly `min`.

use num_traits::Float;

use bilateral_image::ImageError;

/// Find the minimum and maximum values of a buffer.
///
/// # Errors
///
/// Returns [`ImageError::ImageDataNotInitialized`] if the buffer is empty.
pub fn find_min_max<T>(data: &[T]) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let first_element = match data.first() {
        Some(x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let mut min = first_element;
    let mut max = first_element;

    for x in data.iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((*min, *max))
}

/// Linearly rescale a buffer in place so that its values span `[min, max]`.
///
/// A buffer whose values are all equal has no range to stretch; every value is then set to
/// `min`.
///
/// # Example
///
/// ```
/// use bilateral_imgproc::normalize::normalize_min_max;
///
/// let mut data = vec![2.0f32, 4.0, 6.0];
/// normalize_min_max(&mut data, 0.0, 1.0).unwrap();
/// assert_eq!(data, vec![0.0, 0.5, 1.0]);
/// ```
pub fn normalize_min_max<T>(data: &mut [T], min: T, max: T) -> Result<(), ImageError>
where
    T: Float,
{
    let (min_val, max_val) = find_min_max(data)?;
    let range = max_val - min_val;

    let scale = if range > T::epsilon() {
        (max - min) / range
    } else {
        T::zero()
    };
    let shift = min - min_val * scale;

    data.iter_mut().for_each(|x| *x = *x * scale + shift);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_min_max() -> Result<(), ImageError> {
        let (min, max) = find_min_max(&[3u8, 1, 7, 2])?;
        assert_eq!((min, max), (1, 7));
        assert_eq!(
            find_min_max::<f32>(&[]),
            Err(ImageError::ImageDataNotInitialized)
        );
        Ok(())
    }

    #[test]
    fn test_normalize_min_max() -> Result<(), ImageError> {
        let mut data = vec![-1.0f32, 0.0, 1.0, 3.0];
        normalize_min_max(&mut data, 0.0, 1.0)?;
        for (x, expected) in data.iter().zip([0.0f32, 0.25, 0.5, 1.0]) {
            approx::assert_relative_eq!(*x, expected);
        }
        Ok(())
    }

    #[test]
    fn test_normalize_min_max_constant() -> Result<(), ImageError> {
        let mut data = vec![0.7f32; 5];
        normalize_min_max(&mut data, 0.0, 1.0)?;
        assert!(data.iter().all(|&x| x == 0.0));
        Ok(())
    }
}
