use chord_rs_renderer::aggregate::{IngestOptions, ingest};
use chord_rs_renderer::config::LayoutConfig;
use chord_rs_renderer::ir::RawEdge;
use chord_rs_renderer::layout::compute_layout;
use chord_rs_renderer::render::render_svg;
use chord_rs_renderer::table::{CsvTable, DataTable, records_from_table};
use chord_rs_renderer::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_csv(targets: usize, sources: usize, rows: usize, with_hint: bool) -> String {
    let mut out = String::from("target,weight,source,day\n");
    for i in 0..rows {
        let target = i % targets.max(1);
        let source = (i * 7 + i / 3) % sources.max(1);
        let weight = 1 + (i * 13) % 97;
        if with_hint {
            let day = 1 + i % 28;
            out.push_str(&format!(
                "T{target},{weight},S{source},2024-03-{day:02}\n"
            ));
        } else {
            out.push_str(&format!("T{target},{weight},S{source},\n"));
        }
    }
    out
}

fn synthetic_records(targets: usize, sources: usize, rows: usize, with_hint: bool) -> Vec<RawEdge> {
    let csv = synthetic_csv(targets, sources, rows, with_hint);
    let table = CsvTable::parse(&csv, true).expect("synthetic csv");
    records_from_table(&table, &LayoutConfig::default().data_columns)
}

const SIZES: [(&str, usize, usize, usize); 4] = [
    ("tiny", 3, 4, 8),
    ("small", 8, 20, 120),
    ("medium", 20, 80, 1_000),
    ("large", 40, 300, 10_000),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, targets, sources, rows) in SIZES {
        let input = synthetic_csv(targets, sources, rows, true);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let table = CsvTable::parse(black_box(data), true).expect("parse failed");
                black_box(table.num_rows());
            });
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let theme = Theme::classic();
    for (name, targets, sources, rows) in SIZES {
        let records = synthetic_records(targets, sources, rows, true);
        let options = IngestOptions {
            palette: &theme.palette,
            use_position_hint: true,
            color_seed: Some(7),
        };
        group.bench_with_input(BenchmarkId::from_parameter(name), &records, |b, data| {
            b.iter(|| {
                let model = ingest(black_box(data), &options).expect("ingest failed");
                black_box(model.num_connections());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (name, targets, sources, rows) in SIZES {
        let records = synthetic_records(targets, sources, rows, false);
        let options = IngestOptions {
            palette: &theme.palette,
            use_position_hint: false,
            color_seed: Some(7),
        };
        let model = ingest(&records, &options).expect("ingest failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &model, |b, data| {
            b.iter(|| {
                let drawing = compute_layout(black_box(data), &theme, &config);
                black_box(drawing.primitives.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (name, targets, sources, rows) in SIZES {
        let input = synthetic_csv(targets, sources, rows, true);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let table = CsvTable::parse(black_box(data), true).expect("parse failed");
                let records = records_from_table(&table, &config.data_columns);
                let options = IngestOptions {
                    palette: &theme.palette,
                    use_position_hint: config.use_position_hint,
                    color_seed: Some(7),
                };
                let model = ingest(&records, &options).expect("ingest failed");
                let drawing = compute_layout(&model, &theme, &config);
                let svg = render_svg(&drawing, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_aggregate, bench_layout, bench_end_to_end
);
criterion_main!(benches);
