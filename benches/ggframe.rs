use criterion::{criterion_group, criterion_main, Criterion};
use ggframe::{
    BruteForceMatcher, DescriptorMatcher, Feature, FeatureDetector, Frame, FrameResult,
    GridAligner, ImageView, Keypoint, PatternLocator, Pos, Rec, Size,
};
use std::hint::black_box;

fn make_frame(rows: usize, cols: usize) -> Frame {
    let mut data = Vec::with_capacity(rows * cols * 3);
    for y in 0..rows {
        for x in 0..cols {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.extend_from_slice(&[value as u8, (value / 2) as u8, 0]);
        }
    }
    Frame::from_vec(data, rows, cols, 3).unwrap()
}

/// Strict 3x3 maxima with a 5x5 raw patch descriptor.
struct PatchMaxDetector;

impl FeatureDetector for PatchMaxDetector {
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        let mut out = Vec::new();
        for row in 2..image.height().saturating_sub(2) {
            for col in 2..image.width().saturating_sub(2) {
                if mask.get(row, col) != Some(&1) {
                    continue;
                }
                let center = image.get(row, col).copied().unwrap_or(0);
                let mut is_max = true;
                for r in row - 1..=row + 1 {
                    for c in col - 1..=col + 1 {
                        if (r, c) != (row, col) && image.get(r, c).copied().unwrap_or(0) >= center
                        {
                            is_max = false;
                        }
                    }
                }
                if is_max {
                    out.push(Keypoint::at(row as f32, col as f32));
                }
            }
        }
        Ok(out)
    }

    fn compute(
        &self,
        image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        let mut out = Vec::with_capacity(keypoints.len());
        for kp in keypoints {
            let p = kp.pos();
            let patch = image.region(Rec::tlbr(p.row() - 2, p.col() - 2, p.row() + 2, p.col() + 2))?;
            let mut descriptor = Vec::with_capacity(25);
            for r in 0..patch.height() {
                descriptor.extend(patch.row(r).unwrap_or(&[]).iter().map(|&v| v as f32));
            }
            out.push(Feature::new(kp, descriptor));
        }
        Ok(out)
    }
}

fn bench_grid(c: &mut Criterion) {
    let aligner = GridAligner::new(16).unwrap();
    let bounds = Rec::tlbr(0, 0, 1079, 1919);
    let size = Size::hw(45, 120).unwrap();
    c.bench_function("grid_rec_centered", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(aligner.best_rec_centered_at(
                    Pos::rc(i % 1080, (i * 7) % 1920),
                    size,
                    bounds,
                ));
            }
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let features = |n: usize, seed: usize| -> Vec<Feature> {
        (0..n)
            .map(|i| {
                let desc = (0..32)
                    .map(|d| (((i + seed) * 31 + d * 17) % 251) as f32)
                    .collect::<Vec<_>>();
                Feature::new(Keypoint::at(i as f32, 0.0), desc)
            })
            .collect()
    };
    let query = features(200, 3);
    let train = features(1000, 0);
    let matcher = BruteForceMatcher::default();
    c.bench_function("brute_force_knn2_200x1000", |b| {
        b.iter(|| black_box(matcher.knn_match(&query, &train, 2).unwrap()));
    });
}

fn bench_locate(c: &mut Criterion) {
    let scene = make_frame(240, 320);
    let template = scene.crop(Rec::tlbr(60, 80, 139, 179)).unwrap();
    let locator = PatternLocator::new(PatchMaxDetector);
    c.bench_function("find_pattern_240x320", |b| {
        b.iter(|| black_box(locator.find_pattern(&scene, &template)));
    });
}

criterion_group!(benches, bench_grid, bench_matching, bench_locate);
criterion_main!(benches);
