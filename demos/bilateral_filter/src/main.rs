use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

use bilateral::{
    image::{ops, Image},
    imgproc::{
        self,
        filter::kernels,
        parallel::ExecutionStrategy,
    },
    io::functional as F,
};

#[derive(FromArgs)]
/// Smooth a grayscale image with the bilateral filter and compare it against a gaussian blur
struct Args {
    /// path to the input image, converted to grayscale on load
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// directory where the output images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// side of the square filter window
    #[argh(option, default = "7")]
    kernel_size: usize,

    /// sigma of the spatial gaussian
    #[argh(option, default = "50.0")]
    sigma_space: f32,

    /// sigma of the range gaussian, in intensity levels
    #[argh(option, default = "50.0")]
    sigma_range: f32,

    /// number of worker threads, defaults to the global rayon pool
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let img = F::read_image_any_gray8(&args.input)?;
    log::info!(
        "loaded {} ({}x{})",
        args.input.display(),
        img.width(),
        img.height()
    );

    let strategy = args
        .threads
        .map_or(ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed);

    // bilateral filter
    let spatial_kernel = kernels::build_spatial_kernel(args.kernel_size, args.sigma_space)?;
    let range_kernel = kernels::build_range_kernel(args.sigma_range)?;
    log::debug!(
        "spatial kernel {}x{}: {:?}",
        spatial_kernel.size(),
        spatial_kernel.size(),
        spatial_kernel.as_slice()
    );

    let mut img_bilateral = Image::from_size_val(img.size(), 0u8)?;
    let start = Instant::now();
    imgproc::filter::bilateral_filter_with_kernels(
        &img,
        &mut img_bilateral,
        &spatial_kernel,
        Some(&range_kernel),
        strategy,
    )?;
    log::info!("bilateral filter took {:?}", start.elapsed());

    // gaussian blur with the same window for comparison
    let mut img_f32 = Image::from_size_val(img.size(), 0f32)?;
    ops::cast_and_scale(&img, &mut img_f32, 1.0)?;
    let mut img_f32_blurred = Image::from_size_val(img.size(), 0f32)?;
    let start = Instant::now();
    imgproc::filter::gaussian_blur(
        &img_f32,
        &mut img_f32_blurred,
        (args.kernel_size, args.kernel_size),
        (args.sigma_space, args.sigma_range),
    )?;
    log::info!("gaussian blur took {:?}", start.elapsed());

    let mut img_gauss = Image::from_size_val(img.size(), 0u8)?;
    ops::saturate_cast_u8(&img_f32_blurred, &mut img_gauss)?;

    std::fs::create_dir_all(&args.output_dir)?;
    for (name, image) in [
        ("Input.png", &img),
        ("BilateralOutput.png", &img_bilateral),
        ("GaussOutput.png", &img_gauss),
    ] {
        let path = args.output_dir.join(name);
        F::write_image_gray8(&path, image)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
