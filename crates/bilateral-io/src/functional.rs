use std::path::Path;

use bilateral_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image in one of the supported 8-bit layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(img) => img.num_channels(),
            GenericImage::Rgb8(img) => img.num_channels(),
            GenericImage::Rgba8(img) => img.num_channels(),
        }
    }
}

fn decode_any(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} ({}x{}, {:?})",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate and keeps the
/// channel layout of the file.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if the path does not exist.
/// * [`IoError::ImageDecodeError`] if the file is not a decodable image.
/// * [`IoError::UnsupportedImageFormat`] if the pixels are not 8-bit gray, RGB or RGBA.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let img = decode_any(file_path.as_ref())?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        image::ColorType::Rgb8 => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        image::ColorType::Rgba8 => {
            GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
        }
        other => return Err(IoError::UnsupportedImageFormat(format!("{other:?}"))),
    };

    Ok(image)
}

/// Reads an image from the given file path and converts it to 8-bit grayscale.
///
/// Color images are converted to luma; images with more than 8 bits per sample are rescaled.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = decode_any(file_path.as_ref())?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

/// Writes a grayscale image to the given file path.
///
/// The encoding is chosen from the file extension (png, jpg, bmp, tiff).
///
/// # Arguments
///
/// * `file_path` - The path of the file to write.
/// * `image` - The image to encode.
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::L8,
    )
    .map_err(IoError::ImageEncodeError)?;

    log::debug!(
        "wrote {} ({}x{})",
        file_path.display(),
        image.width(),
        image.height()
    );

    Ok(())
}
