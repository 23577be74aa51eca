use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pinsev_core::{to_json_string, Pipeline, DEFAULT_SECTORS};
use pinsev_sheet::{CellValue, RawSheet};

struct BenchSheets {
    pin: RawSheet,
    severity: RawSheet,
}

impl BenchSheets {
    fn new(rows: usize) -> Self {
        let mut pin_header: Vec<CellValue> = ["Admin 0", "Admin 1", "Admin 2 P-Code", "ISO3", "Population", "Final PiN"]
            .iter()
            .map(|name| CellValue::from(*name))
            .collect();
        pin_header.extend(DEFAULT_SECTORS.iter().map(|s| CellValue::from(*s)));

        let mut severity_header: Vec<CellValue> = ["Admin 0", "Admin 2 P-Code", "Final Severity"]
            .iter()
            .map(|name| CellValue::from(*name))
            .collect();
        severity_header.extend(DEFAULT_SECTORS.iter().map(|s| CellValue::from(*s)));

        let mut pin = vec![vec![CellValue::from("Humanitarian Needs Overview")], pin_header];
        let mut severity = vec![severity_header];

        for i in 0..rows {
            let code = format!("XY{i:05}");
            let mut row = vec![
                CellValue::from("Country X"),
                CellValue::from(format!("Province {}", i % 40)),
                CellValue::from(code.as_str()),
                CellValue::from("AFG"),
                CellValue::Int(10_000 + i as i64),
                // every seventh row carries a text placeholder
                if i % 7 == 0 {
                    CellValue::from("N/A")
                } else {
                    CellValue::Float((i as f64) * 1.5)
                },
            ];
            row.extend((0..DEFAULT_SECTORS.len()).map(|s| CellValue::Int((i + s) as i64)));
            pin.push(row);

            // a tenth of the PiN rows have no severity counterpart
            if i % 10 != 0 {
                let mut row = vec![
                    CellValue::from("Country X"),
                    CellValue::from(code.as_str()),
                    CellValue::from(((i % 5) + 1).to_string()),
                ];
                row.extend((0..DEFAULT_SECTORS.len()).map(|s| CellValue::Int(((i + s) % 5 + 1) as i64)));
                severity.push(row);
            }
        }

        Self {
            pin: RawSheet::from_data("PiN", pin),
            severity: RawSheet::from_data("Severity", severity),
        }
    }
}

fn bench_pipeline_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::default();

    for size in [1_000, 5_000].iter() {
        let sheets = BenchSheets::new(*size);

        group.bench_with_input(BenchmarkId::new("run", size), size, |b, _| {
            b.iter_batched(
                || (sheets.pin.clone(), sheets.severity.clone()),
                |(pin, severity)| pipeline.run(black_box(pin), black_box(severity)),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let pipeline = Pipeline::default();

    for size in [1_000, 5_000].iter() {
        let sheets = BenchSheets::new(*size);
        let output = pipeline.run(sheets.pin, sheets.severity).unwrap();

        group.bench_with_input(BenchmarkId::new("json", size), size, |b, _| {
            b.iter(|| to_json_string(black_box(&output.records), false))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_run, bench_emit);
criterion_main!(benches);
