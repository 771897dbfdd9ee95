use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use diffquot::experiments::ScanConfig;
use diffquot::{norm_sq, run_underflow_scan, SampleRng};

fn bench_norms(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_sq");
    let mut rng = SampleRng::with_seed(42);

    for &n in &[10usize, 1_000, 100_000] {
        let mut x_f = vec![0.0f32; n];
        let mut x = vec![0.0f64; n];
        rng.fill_uniform(&mut x_f, 1.0).unwrap();
        rng.fill_uniform(&mut x, 1.0).unwrap();

        group.bench_with_input(BenchmarkId::new("single", n), &x_f, |b, x_f| {
            b.iter(|| norm_sq(x_f, x_f.len()))
        });

        group.bench_with_input(BenchmarkId::new("double", n), &x, |b, x| {
            b.iter(|| norm_sq(x, x.len()))
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let config = ScanConfig::default();
    c.bench_function("underflow_scan_double", |b| {
        b.iter(|| run_underflow_scan::<f64>(&config).unwrap())
    });
}

criterion_group!(benches, bench_norms, bench_scan);
criterion_main!(benches);
