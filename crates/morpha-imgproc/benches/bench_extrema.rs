use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use morpha_imgproc::border::BorderMode;
use morpha_imgproc::extrema::find_regional_maxima;
use morpha_imgproc::morphology::{grey_dilation, Footprint};
use morpha_tensor::Tensor;

fn bench_extrema(c: &mut Criterion) {
    let mut group = c.benchmark_group("RegionalExtrema");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let data = (0..width * height).map(|_| rng.random::<f32>()).collect();
            let image = Tensor::<f32, 2>::from_shape_vec([*height, *width], data).unwrap();
            let footprint = Footprint::full([*kernel_size, *kernel_size]).unwrap();

            group.bench_with_input(
                BenchmarkId::new("grey_dilation", &parameter_string),
                &image,
                |b, i| {
                    let mut dst = i.clone();
                    b.iter(|| {
                        black_box(grey_dilation(i, &mut dst, &footprint, BorderMode::Reflect))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("find_regional_maxima", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(find_regional_maxima(i, &footprint))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_extrema);
criterion_main!(benches);
