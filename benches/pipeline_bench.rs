use chart_prep::api::{ColumnRole, StackingMode, build_series, compose_layout, update_data};
use chart_prep::core::{ChartKind, ElementSize, Row, row_from_json};
use chart_prep::format::NumberFormatter;
use chart_prep::ChartOptions;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn dataset(rows: usize, series: usize) -> Vec<Row> {
    (0..rows)
        .map(|i| {
            row_from_json(json!({
                "day": (i / series) as f64,
                "value": ((i * 37) % 101) as f64 + 0.25,
                "group": format!("g{}", i % series),
            }))
        })
        .collect()
}

fn stacked_area() -> ChartOptions {
    ChartOptions::new(ChartKind::Area)
        .with_column("day", ColumnRole::X)
        .with_column("value", ColumnRole::Y)
        .with_column("group", ColumnRole::Series)
        .with_stacking(Some(StackingMode::Stack))
        .with_percent_values(true)
}

fn bench_build_series_10k(c: &mut Criterion) {
    let rows = dataset(10_000, 8);
    let options = stacked_area().resolve();

    c.bench_function("build_series_10k", |b| {
        b.iter(|| {
            let _ = build_series(black_box(&rows), black_box(&options));
        })
    });
}

fn bench_update_data_stacked_10k(c: &mut Criterion) {
    let rows = dataset(10_000, 8);
    let options = stacked_area().resolve();
    let mut series = build_series(&rows, &options);

    c.bench_function("update_data_stacked_10k", |b| {
        b.iter(|| {
            let _ = update_data(black_box(&mut series), black_box(&options)).len();
        })
    });
}

fn bench_compose_layout(c: &mut Criterion) {
    let rows = dataset(1_000, 8);
    let options = stacked_area().resolve();
    let series = build_series(&rows, &options);

    c.bench_function("compose_layout", |b| {
        b.iter(|| {
            let _ = compose_layout(
                black_box(ElementSize::new(1920.0, 1080.0)),
                black_box(&options),
                black_box(&series),
            );
        })
    });
}

fn bench_number_format(c: &mut Criterion) {
    let formatter = NumberFormatter::new("0,0[.]00000");

    c.bench_function("number_format", |b| {
        b.iter(|| {
            let _ = formatter.format(black_box(1_234_567.891_23));
        })
    });
}

criterion_group!(
    benches,
    bench_build_series_10k,
    bench_update_data_stacked_10k,
    bench_compose_layout,
    bench_number_format
);
criterion_main!(benches);
