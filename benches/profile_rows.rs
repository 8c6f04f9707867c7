use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use csv_profiler::data::Value;
use csv_profiler::stats::TableStats;

fn generate_rows(rows: usize) -> Vec<Vec<Value>> {
    (0..rows)
        .map(|i| {
            let status = match i % 3 {
                0 => "shipped",
                1 => "pending",
                _ => "processing",
            };
            vec![
                Value::Text(format!("{i:08}")),
                Value::Text(status.to_string()),
                Value::Integer((i % 97) as i64),
                if i % 11 == 0 {
                    Value::Empty
                } else {
                    Value::Float(i as f64 / 7.0)
                },
            ]
        })
        .collect()
}

fn column_names() -> Vec<String> {
    ["id", "status", "qty", "amount"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn bench_analyze_rows(c: &mut Criterion) {
    let rows = generate_rows(10_000);
    let names = column_names();
    c.bench_function("analyze_10k_rows_cap20", |b| {
        b.iter_batched(
            || TableStats::new(20, &names).expect("table"),
            |mut table| {
                for row in &rows {
                    table.analyze_row(row).expect("row");
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("analyze_10k_rows_cap1000", |b| {
        b.iter_batched(
            || TableStats::new(1_000, &names).expect("table"),
            |mut table| {
                for row in &rows {
                    table.analyze_row(row).expect("row");
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_analyze_rows);
criterion_main!(benches);
