use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sig_core::{BinaryImage, FeatureConfig};
use sig_fast::{CornerDetector, FastDetector};

/// Binary image with a looping stroke resembling handwriting
fn create_benchmark_image(width: usize, height: usize) -> BinaryImage {
    let mut data = vec![255u8; width * height];
    let steps = width * 4;
    for i in 0..steps {
        let t = i as f32 / steps as f32 * std::f32::consts::TAU * 3.0;
        let cx = width as f32 * (0.1 + 0.8 * i as f32 / steps as f32);
        let cy = height as f32 * 0.5 + (t.sin() * 0.3 + (2.3 * t).cos() * 0.1) * height as f32;
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let x = (cx as i32 + dx).clamp(0, width as i32 - 1) as usize;
                let y = (cy as i32 + dy).clamp(0, height as i32 - 1) as usize;
                data[y * width + x] = 0;
            }
        }
    }
    BinaryImage::from_raw(width, height, data).expect("valid benchmark image")
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_detection");
    let detector = FastDetector::new(FeatureConfig::default()).expect("default config is valid");

    for &(w, h) in &[(320usize, 120usize), (640, 240), (1280, 480)] {
        let img = create_benchmark_image(w, h);
        group.bench_with_input(BenchmarkId::new("detect_keypoints", format!("{}x{}", w, h)), &img, |b, img| {
            b.iter(|| detector.detect_keypoints(black_box(img)))
        });
        group.bench_with_input(BenchmarkId::new("candidates", format!("{}x{}", w, h)), &img, |b, img| {
            b.iter(|| CornerDetector::detect_candidates(black_box(img), 18, 20))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
