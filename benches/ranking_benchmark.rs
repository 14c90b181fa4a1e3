//! Benchmark of quantile discretization and information gain ranking
//!
//! Run with: cargo bench --bench ranking_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use morphent::pipeline::{discretize, rank_predictors, Variable, VariableTable};

/// Synthetic morphometric table: one species target and `n_measurements`
/// continuous columns, every third of which tracks the species.
fn generate_table(n_rows: usize, n_measurements: usize, seed: u64) -> VariableTable {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let species: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..4)).collect();
    let mut variables = vec![Variable::categorical(
        "species",
        species.iter().map(|s| Some(format!("sp{}", s))),
    )];

    for i in 0..n_measurements {
        let values: Vec<Option<f64>> = species
            .iter()
            .map(|&s| {
                if rng.gen::<f64>() < 0.05 {
                    None
                } else if i % 3 == 0 {
                    Some(s as f64 * 2.0 + rng.gen::<f64>())
                } else {
                    Some(rng.gen::<f64>() * 10.0)
                }
            })
            .collect();
        variables.push(Variable::continuous(&format!("m_{}", i), values));
    }

    VariableTable::new(variables).expect("Failed to build table")
}

fn benchmark_discretize(c: &mut Criterion) {
    let mut group = c.benchmark_group("discretize");
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    for &n_rows in &[1_000usize, 10_000, 100_000] {
        let values: Vec<Option<f64>> = (0..n_rows).map(|_| Some(rng.gen::<f64>())).collect();
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("k6", n_rows), &values, |b, values| {
            b.iter(|| discretize(black_box(values), 6).expect("discretize failed"))
        });
    }

    group.finish();
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_predictors");
    group.sample_size(20);

    for &(n_rows, n_measurements) in &[(1_000usize, 20usize), (10_000, 20), (10_000, 100)] {
        let table = generate_table(n_rows, n_measurements, 42);
        group.throughput(Throughput::Elements((n_rows * n_measurements) as u64));

        group.bench_with_input(
            BenchmarkId::new("rows_x_cols", format!("{}x{}", n_rows, n_measurements)),
            &table,
            |b, table| {
                b.iter(|| rank_predictors(black_box(table), "species", 6).expect("ranking failed"))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_discretize, benchmark_ranking);
criterion_main!(benches);
