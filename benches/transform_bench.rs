use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ebrechnung::core::*;
use ebrechnung::{CodecConfig, ebinterface, transform};

fn build_invoice(lines: usize) -> RawInvoice {
    let rates = [dec!(20), dec!(10), dec!(13), dec!(0)];
    let mut builder = InvoiceRequestBuilder::new("BENCH-001", "2024-06-15")
        .biller(
            BillerBuilder::new(
                "Benchmark GmbH",
                "ATU12345678",
                RawAddress::new("Hauptstraße 1", "1010", "Wien"),
            )
            .email("rechnung@benchmark.at")
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                "Stadt Wien",
                "ATU87654321",
                "PO-2024-001",
                RawAddress::new("Rathausplatz 1", "1010", "Wien"),
            )
            .build(),
        )
        .payment("AT611904300234573201", "BKAUATWW");

    for i in 1..=lines {
        let rate: Decimal = rates[i % rates.len()];
        builder = builder.add_line(
            LineItemBuilder::new(format!("Leistung {i}"), (i % 9 + 1) as i64, 999 + i as i64)
                .tax_rate(rate)
                .build(),
        );
    }

    builder.build()
}

fn bench_validate(c: &mut Criterion) {
    let raw = build_invoice(10);
    c.bench_function("validate_10_lines", |b| {
        b.iter(|| black_box(validate(black_box(&raw))));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let request = validate(&build_invoice(1000)).unwrap();
    c.bench_function("aggregate_1000_lines", |b| {
        b.iter(|| black_box(aggregate(black_box(&request.lines))));
    });
}

fn bench_serialize(c: &mut Criterion) {
    let request = validate(&build_invoice(10)).unwrap();
    let config = CodecConfig::default();
    c.bench_function("ebinterface_serialize_10_lines", |b| {
        b.iter(|| black_box(ebinterface::to_ebinterface_bytes(black_box(&request), &config)));
    });
}

fn bench_transform(c: &mut Criterion) {
    let small = build_invoice(10);
    c.bench_function("transform_10_lines", |b| {
        b.iter(|| black_box(transform(black_box(&small))));
    });

    let large = build_invoice(1000);
    c.bench_function("transform_1000_lines", |b| {
        b.iter(|| black_box(transform(black_box(&large))));
    });
}

#[cfg(feature = "json")]
fn bench_transform_json(c: &mut Criterion) {
    let body = serde_json::to_vec(&build_invoice(10)).unwrap();
    let config = CodecConfig::default();
    c.bench_function("transform_json_10_lines", |b| {
        b.iter(|| black_box(ebrechnung::transform_json(black_box(&body), &config)));
    });
}

#[cfg(not(feature = "json"))]
fn bench_transform_json(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_validate,
    bench_aggregate,
    bench_serialize,
    bench_transform,
    bench_transform_json,
);
criterion_main!(benches);
