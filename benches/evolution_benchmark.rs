use criterion::{criterion_group, criterion_main, Criterion};
use queens_ga::config::GaConfig;
use queens_ga::evolution::population::Population;
use queens_ga::evolution::run_once;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn benchmark_fitness(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let population = Population::random(20, &mut rng);

    c.bench_function("population_fitness", |b| {
        b.iter(|| black_box(&population).fitnesses())
    });
}

fn benchmark_full_run(c: &mut Criterion) {
    let config = GaConfig::default();

    let mut group = c.benchmark_group("EvolutionEngine Performance");
    group.bench_function("seeded_run", |b| {
        // Same seed every iteration so each sample does the same work
        b.iter(|| run_once(&config, StdRng::seed_from_u64(black_box(42))))
    });
    group.finish();
}

criterion_group!(benches, benchmark_fitness, benchmark_full_run);
criterion_main!(benches);
