use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use wavetoy::algs::stencil::step;
use wavetoy::config::Recurrence;
use wavetoy::data::field::TimeLevels;
use wavetoy::data::init::seed_gaussian;
use wavetoy::prelude::*;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("stencil_step");
    for &n in &[64usize, 256, 1024] {
        let d = Decomposition::new(n, n, 0, 2).unwrap();
        let mut levels = TimeLevels::new(&d);
        seed_gaussian(levels.previous_mut(), &d);
        seed_gaussian(levels.current_mut(), &d);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| step(&mut levels, 0.1, Recurrence::Leapfrog));
        });
    }
    group.finish();
}

fn bench_two_rank_run(c: &mut Criterion) {
    let cfg = WaveConfig::new(128, 128, 10);
    c.bench_function("run_in_process_2x128", |b| {
        b.iter(|| run_in_process(&cfg, 2).unwrap());
    });
}

criterion_group!(benches, bench_step, bench_two_rank_run);
criterion_main!(benches);
