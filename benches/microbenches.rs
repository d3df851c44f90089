//! Criterion microbenches for formtag document handling.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Form document parsing (from_json_str)
//! - Store export and document import
//! - Cascading deletes on a large store

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use std::hint::black_box;

use formtag::format::io_json::from_json_str;
use formtag::format::{export_store, import_document, ExportOptions};
use formtag::model::{BoundingBox, EntityId, NewInput};
use formtag::store::AnnotationStore;

// Include test fixtures at compile time (no file I/O during benchmark)
const DOCUMENT_FIXTURE: &str = include_str!("../tests/fixtures/sample_valid.form.json");

/// A store with `sections` sections, each holding 8 labels with 3 inputs.
fn synthetic_store(sections: usize) -> AnnotationStore {
    let mut store = AnnotationStore::new();
    for s in 0..sections {
        let y = (s * 200) as f64;
        let section = store
            .create_section(
                &format!("Section {s}"),
                BoundingBox::from_xyxy(0.0, y, 600.0, y + 190.0),
            )
            .unwrap()
            .id;
        for l in 0..8 {
            let ly = y + (l * 20) as f64;
            let label = store
                .create_label(
                    section,
                    &format!("Label {l}"),
                    BoundingBox::from_xyxy(10.0, ly, 200.0, ly + 18.0),
                )
                .unwrap()
                .id;
            for i in 0..3 {
                let x = 210.0 + (i * 120) as f64;
                store
                    .create_input(
                        label,
                        NewInput::new(format!("input_{s}_{l}_{i}")).with_type("text"),
                        BoundingBox::from_xyxy(x, ly, x + 110.0, ly + 18.0),
                    )
                    .unwrap();
            }
        }
    }
    store
}

/// Benchmark form document parsing from string.
fn bench_document_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_parse");
    group.throughput(Throughput::Bytes(DOCUMENT_FIXTURE.len() as u64));

    group.bench_function("from_json_str", |b| {
        b.iter(|| {
            let doc = from_json_str(black_box(DOCUMENT_FIXTURE)).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark store export.
fn bench_export(c: &mut Criterion) {
    let store = synthetic_store(50);
    let opts = ExportOptions::new("bench", 1);

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(store.len() as u64));

    group.bench_function("export_store", |b| {
        b.iter(|| {
            let doc = export_store(black_box(&store), &opts);
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark document import.
///
/// The document is exported once outside the timed region.
fn bench_import(c: &mut Criterion) {
    let store = synthetic_store(50);
    let doc = export_store(&store, &ExportOptions::new("bench", 1));

    let mut group = c.benchmark_group("import");
    group.throughput(Throughput::Elements(store.len() as u64));

    group.bench_function("import_document", |b| {
        b.iter(|| {
            let imported = import_document(black_box(&doc)).unwrap();
            black_box(imported)
        })
    });

    group.finish();
}

/// Benchmark deleting every section (each delete cascades to 32 entities).
fn bench_cascade_delete(c: &mut Criterion) {
    let template = synthetic_store(50);
    let section_ids: Vec<EntityId> = template.sections().map(|s| s.id).collect();

    c.bench_function("cascade_delete_all_sections", |b| {
        b.iter_batched(
            || template.clone(),
            |mut store| {
                for id in &section_ids {
                    black_box(store.delete_entity(*id));
                }
                store
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_document_parse,
    bench_export,
    bench_import,
    bench_cascade_delete,
);
criterion_main!(benches);
