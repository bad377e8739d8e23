//! Rule engine performance benchmarks.
//!
//! Measures normalization and a full evaluation pass over synthetic movement logs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flightcheck::schema::DatasetRole;
use flightcheck::{DataTable, Flightcheck, Normalizer, RuleEngine};

const HEADERS: &[&str] = &[
    "Id.Vuelo", "Data", "Sit.", "Est.", "Stand", "Sv.", "ETime", "F.ETime", "AIBT", "ALDT",
    "Registro", "Id.Asociado",
];

/// Build a movement log with a mix of commercial and ZZZ- movements.
fn movement_table(rows: usize) -> DataTable {
    let data = (0..rows)
        .map(|i| {
            let id = match i % 5 {
                0 => format!("ZZZ-PT-{:03}", i % 1000),
                1 => format!("ZZZ-FAB{:03}", i % 1000),
                _ => format!("AA{}", i),
            };
            let day = i % 28 + 1;
            let month = if i % 3 == 0 { 1 } else { 3 };
            vec![
                id.clone(),
                format!("{:02}/{:02}/2024", day, month),
                if i % 7 == 0 { "CAN" } else { "OPE" }.to_string(),
                if i % 11 == 0 { "GRU" } else { "IBK" }.to_string(),
                if i % 13 == 0 { "HOLD" } else { "12" }.to_string(),
                ["A", "E", "W", "D", "J"][i % 5].to_string(),
                "10:00".to_string(),
                "10:00".to_string(),
                format!("10:{:02}", i % 10),
                "10:05".to_string(),
                format!("PT-{:03}", i % 1000),
                if i % 2 == 0 { id } else { String::new() },
            ]
        })
        .collect();

    DataTable::new(HEADERS.iter().map(|h| h.to_string()).collect(), data, b';')
}

/// Benchmark record normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let normalizer = Normalizer::new();

    for size in [100, 1_000, 10_000] {
        let table = movement_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(normalizer.normalize(table)))
        });
    }

    group.finish();
}

/// Benchmark rule evaluation on normalized records.
fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let normalizer = Normalizer::new();
    let engine = RuleEngine::new();

    for size in [100, 1_000, 10_000] {
        let flights = normalizer.normalize(&movement_table(size));
        group.bench_with_input(BenchmarkId::new("arrival", size), &flights, |b, flights| {
            b.iter(|| black_box(engine.evaluate_flights(DatasetRole::Arrival, flights)))
        });
    }

    group.finish();
}

/// Benchmark the full table-to-report path.
fn bench_full_check(c: &mut Criterion) {
    let flightcheck = Flightcheck::new();
    let table = movement_table(1_000);

    c.bench_function("full_check_1000", |b| {
        b.iter(|| black_box(flightcheck.check_tables(&table, &table)))
    });
}

criterion_group!(benches, bench_normalization, bench_evaluation, bench_full_check);
criterion_main!(benches);
