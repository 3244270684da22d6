//! Criterion microbenches for the line synthesizers.
//!
//! - polygon: point sampler and 2/8-vertex lines on a convex and a concave region.
//! - walk: 5- and 50-vertex walks.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use feeder::geom::SamplerCfg;
use feeder::sample::{sample_point, synthesize_line, walk};
use geo::{coord, polygon, Polygon};
use rand::{rngs::StdRng, SeedableRng};

fn comb(teeth: usize) -> Polygon<f64> {
    // Concave comb: base strip plus `teeth` narrow columns.
    let mut ring = vec![(0.0, 0.0), (teeth as f64 * 2.0, 0.0)];
    for k in (0..teeth).rev() {
        let x = k as f64 * 2.0;
        ring.push((x + 1.0, 1.0));
        ring.push((x + 1.0, 10.0));
        ring.push((x, 10.0));
        ring.push((x, 1.0));
    }
    Polygon::new(ring.into(), vec![])
}

fn bench_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon");
    let square = polygon![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 0.0),
        (x: 1.0, y: 1.0),
        (x: 0.0, y: 1.0),
    ];
    let comb = comb(12);
    let cfg = SamplerCfg::default();
    group.bench_function(BenchmarkId::new("sample_point", "square"), |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(42),
            |mut rng| {
                let _ = sample_point(&square, &cfg, &mut rng).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    for &n in &[2usize, 8] {
        group.bench_with_input(BenchmarkId::new("synthesize_line_comb", n), &n, |b, &n| {
            b.iter_batched(
                || StdRng::seed_from_u64(7),
                |mut rng| {
                    let _ = synthesize_line(&comb, n, &cfg, &mut rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let start = coord! { x: 69.3451, y: 30.3753 };
    for &n in &[5usize, 50] {
        group.bench_with_input(BenchmarkId::new("walk", n), &n, |b, &n| {
            b.iter_batched(
                || StdRng::seed_from_u64(2025),
                |mut rng| {
                    let _ = walk(start, 25.0, n, &mut rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_polygon, bench_walk);
criterion_main!(benches);
