use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bilateral_image::Image;
use bilateral_imgproc::{
    filter::{bilateral_filter_with_kernels, gaussian_blur, kernels},
    parallel::ExecutionStrategy,
};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bilateral Filter");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height).map(|i| (i % 256) as u8).collect();
            let image_size = [*width, *height].into();

            let image_u8 = Image::<u8, 1>::new(image_size, image_data).unwrap();
            let image_f32 = image_u8.cast::<f32>().unwrap();

            // output image
            let output_u8 = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();
            let output_f32 = Image::<f32, 1>::from_size_val(image_size, 0.0).unwrap();

            let spatial = kernels::build_spatial_kernel(*kernel_size, 50.0).unwrap();
            let range = kernels::build_range_kernel(50.0).unwrap();

            for (name, strategy) in [
                ("bilateral_serial", ExecutionStrategy::Serial),
                ("bilateral_parallel_rows", ExecutionStrategy::ParallelRows),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &(&image_u8, &output_u8),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| {
                            black_box(bilateral_filter_with_kernels(
                                src,
                                &mut dst,
                                &spatial,
                                Some(&range),
                                strategy,
                            ))
                        })
                    },
                );
            }

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_f32", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(gaussian_blur(
                            src,
                            &mut dst,
                            (*kernel_size, *kernel_size),
                            (50.0, 50.0),
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
