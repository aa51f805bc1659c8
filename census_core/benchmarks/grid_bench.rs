use census_core::{
    ingest, per_age_bucket_average, AgentRecord, GridConfig, SpatialGrid, SyntheticPopulation,
    View,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn populated_grid(records: &[AgentRecord]) -> SpatialGrid {
    let mut grid = SpatialGrid::default();
    ingest(&mut grid, records.iter().cloned()).expect("synthetic records ingest");
    grid
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for count in [1_000usize, 10_000, 100_000] {
        let records = SyntheticPopulation::new(42, count).records();
        group.bench_with_input(BenchmarkId::new("agents", count), &records, |b, records| {
            b.iter_batched(
                || {
                    let mut grid = SpatialGrid::default();
                    grid.build().expect("grid builds");
                    (grid, records.clone())
                },
                |(mut grid, records)| ingest(&mut grid, records).expect("ingest"),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let records = SyntheticPopulation::new(42, 100_000).records();
    let grid = populated_grid(&records);
    let ages = GridConfig::default().age_buckets.range();

    group.bench_function("age_buckets", |b| {
        b.iter(|| per_age_bucket_average(grid.zones(), "income", ages.clone()).expect("income"))
    });
    group.bench_function("density_view", |b| {
        let view = View::agreeableness_by_density();
        b.iter(|| view.render(grid.zones(), ages.clone()).expect("render"))
    });

    group.finish();
}

criterion_group!(grid_benches, bench_ingest, bench_aggregate);
criterion_main!(grid_benches);
