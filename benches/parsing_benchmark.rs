use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldtools::models::{Dms, HttpQuery};
use fieldtools::processors::BatchConverter;
use fieldtools::readers::CoordinateLine;

fn dms_layouts(c: &mut Criterion) {
    let inputs = [
        ("compact", "453015N"),
        ("compact_dm", "4530N"),
        ("symbols", "45° 30' 15.5\" N"),
        ("words", "45 deg 30 min 15.5 sec S"),
        ("decimal", "-45.504305"),
        ("no_match", "north by northwest"),
    ];

    let mut group = c.benchmark_group("dms_parse");
    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| Dms::parse(black_box(input)))
        });
    }
    group.finish();
}

fn batch_conversion(c: &mut Criterion) {
    let lines: Vec<CoordinateLine> = (0..10_000)
        .map(|i| CoordinateLine {
            line: i + 1,
            text: format!("{} {} {}.5 {}", i % 180, i % 60, i % 59, if i % 2 == 0 { "N" } else { "W" }),
        })
        .collect();

    let mut group = c.benchmark_group("batch_convert");
    group.sample_size(20);
    for workers in [1, 4] {
        let converter = BatchConverter::new(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &lines, |b, lines| {
            b.iter(|| converter.convert_lines(black_box(lines), None))
        });
    }
    group.finish();
}

fn query_parse(c: &mut Criterion) {
    c.bench_function("query_parse", |b| {
        b.iter(|| HttpQuery::parse(black_box("station=Valentia%20Obs&lat=51.93&lon=-10.24&from=2024-01-01")))
    });
}

criterion_group!(benches, dms_layouts, batch_conversion, query_parse);
criterion_main!(benches);
