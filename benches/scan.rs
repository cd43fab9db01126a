use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Luma, Rgba, RgbaImage};
use qrcode::QrCode;

// Rendered test images
struct TestImage {
    name: &'static str,
    image: DynamicImage,
}

fn test_images() -> Vec<TestImage> {
    let qr = QrCode::new(b"https://example.com/benchmark")
        .unwrap()
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(8, 8)
        .build();
    let rgba = RgbaImage::from_fn(qr.width(), qr.height(), |x, y| {
        let v = qr.get_pixel(x, y).0[0];
        Rgba([v, v / 2, 255 - v / 3, 255])
    });

    vec![
        TestImage {
            name: "qr_gray",
            image: DynamicImage::ImageLuma8(qr),
        },
        TestImage {
            name: "qr_rgba",
            image: DynamicImage::ImageRgba8(rgba),
        },
        TestImage {
            name: "blank_1080p",
            image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                1920,
                1080,
                Rgba([240, 240, 240, 255]),
            )),
        },
    ]
}

fn benchmark_grayscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_grayscale");

    for test_img in test_images() {
        group.bench_with_input(
            BenchmarkId::from_parameter(test_img.name),
            &test_img.image,
            |b, img| b.iter(|| black_box(zbarqr::to_grayscale(black_box(img)).len())),
        );
    }

    group.finish();
}

fn benchmark_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_image");

    for test_img in test_images() {
        group.bench_with_input(
            BenchmarkId::from_parameter(test_img.name),
            &test_img.image,
            |b, img| {
                b.iter(|| {
                    let symbols = zbarqr::from_image(black_box(img)).unwrap();
                    black_box(symbols.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_grayscale, benchmark_scan);
criterion_main!(benches);
