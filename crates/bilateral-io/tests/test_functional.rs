use bilateral_image::{Image, ImageSize};
use bilateral_io::{read_image_any, read_image_any_gray8, write_image_gray8, GenericImage, IoError};

fn make_gray() -> Result<Image<u8, 1>, IoError> {
    let size = ImageSize {
        width: 5,
        height: 3,
    };
    let data = (0..15).map(|i| (i * 17) as u8).collect();
    Ok(Image::new(size, data)?)
}

#[test]
fn write_read_png_gray8() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("gray.png");

    let image = make_gray()?;
    write_image_gray8(&file_path, &image)?;

    let read = read_image_any_gray8(&file_path)?;
    assert_eq!(read, image);

    match read_image_any(&file_path)? {
        GenericImage::L8(img) => assert_eq!(img, image),
        other => panic!("expected a grayscale image, got {} channels", other.num_channels()),
    }

    Ok(())
}

#[test]
fn read_rgb_as_gray8() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("rgb.png");

    let rgb = image::RgbImage::from_pixel(4, 2, image::Rgb([200, 200, 200]));
    rgb.save(&file_path)?;

    let generic = read_image_any(&file_path)?;
    assert_eq!(generic.num_channels(), 3);
    assert_eq!(
        generic.size(),
        ImageSize {
            width: 4,
            height: 2
        }
    );

    let gray = read_image_any_gray8(&file_path)?;
    assert_eq!(gray.num_channels(), 1);
    assert!(gray.as_slice().iter().all(|&v| v == 200));

    Ok(())
}

#[test]
fn read_missing_file() {
    let res = read_image_any_gray8("does/not/exist.png");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}

#[test]
fn read_invalid_file() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("broken.png");
    std::fs::write(&file_path, b"definitely not an image")?;

    let res = read_image_any(&file_path);
    assert!(matches!(res, Err(IoError::ImageDecodeError(_))));

    Ok(())
}
