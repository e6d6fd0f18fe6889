//! Criterion micro-benchmarks for rainflow counting and principal stresses.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stria_bench::{reference_config, reference_history, tensor_series};
use stria_fatigue::{principal_stress_series, RainflowCounter, RainflowMatrix};
use stria_view::{StridedView, StridedViewMut};

fn bench_rainflow_100k(c: &mut Criterion) {
    let history = reference_history(42);
    let view = StridedView::from_slice(&history).unwrap();
    let mut counter = RainflowCounter::from_config(reference_config()).unwrap();
    counter.set_stresses(&view).unwrap();
    c.bench_function("rainflow_compute_100k", |b| {
        b.iter(|| black_box(counter.compute().unwrap()));
    });
}

fn bench_count_pass_only(c: &mut Criterion) {
    let history = reference_history(7);
    let view = StridedView::from_slice(&history).unwrap();
    let mut counter = RainflowCounter::from_config(reference_config()).unwrap();
    counter.set_stresses(&view).unwrap();
    counter.compute().unwrap();
    let bins: Vec<usize> = counter.extrema().iter().map(|e| e.bin).collect();
    c.bench_function("rainflow_count_pass", |b| {
        b.iter(|| {
            let mut m = RainflowMatrix::new(64);
            let out = stria_fatigue::cycles::count_pass(bins.iter().copied(), &mut m);
            black_box(out.cycles)
        });
    });
}

fn bench_principal_series_10k(c: &mut Criterion) {
    let steps = 10_000;
    let buf = tensor_series(steps);
    let series = StridedView::new(
        &buf,
        &[steps, 3, 3],
        &[1, 3 * steps as isize, steps as isize],
    )
    .unwrap();
    let mut out = vec![0.0; steps * 3];
    c.bench_function("principal_series_10k", |b| {
        b.iter(|| {
            let mut ov = StridedViewMut::contiguous(&mut out, &[steps, 3]).unwrap();
            principal_stress_series(&series, &mut ov).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_rainflow_100k,
    bench_count_pass_only,
    bench_principal_series_10k
);
criterion_main!(benches);
