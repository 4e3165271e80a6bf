use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, RgbImage};
use kirana::compress::{compress, target_dimensions, CompressionPolicy, SourceImage};
use std::io::Cursor;

fn noisy_source(width: u32, height: u32) -> SourceImage {
    let mut state: u32 = 0x12fe_ed01;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        image::Rgb([(state & 0xff) as u8, (state >> 8) as u8, (state >> 16) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    SourceImage::new(out.into_inner(), Some("image/jpeg".to_string()))
}

fn bench_policy_creation(c: &mut Criterion) {
    c.bench_function("policy_creation", |b| {
        b.iter(|| {
            CompressionPolicy::new(
                black_box(70 * 1024),
                black_box(500),
                black_box(0.75),
                black_box(0.08),
                black_box(0.25),
            )
        })
    });
}

fn bench_target_dimensions(c: &mut Criterion) {
    c.bench_function("target_dimensions", |b| {
        b.iter(|| target_dimensions(black_box(2000), black_box(1333), black_box(500)))
    });
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.sample_size(10);
    let policy = CompressionPolicy::default();
    for size in [(800u32, 600u32), (2000, 1000)] {
        let source = noisy_source(size.0, size.1);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size.0, size.1)),
            &source,
            |b, source| b.iter(|| compress(black_box(source), black_box(&policy)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_policy_creation,
    bench_target_dimensions,
    bench_compress
);
criterion_main!(benches);
