// In rowpack-core/benches/roundtrip_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use std::sync::Arc;

use rowpack::model::{DeltaIntegerModel, PlainEnumModel, PlainIntegerModel, PlainStringModel};
use rowpack::{
    AttrType, AttrValue, CodecConfig, Compressor, Decompressor, Model, Schema, Tuple, TypeRegistry,
};

// --- Mock Data Generation ---

const BENCH_NUM_TUPLES: usize = 10_000;
const ENUM_DOMAIN: usize = 16;

fn bench_schema() -> Schema {
    Schema::new(vec![
        AttrType::INTEGER, // event start
        AttrType::INTEGER, // event end, correlated with start
        AttrType::ENUM,    // category
        AttrType::STRING,  // label
    ])
}

fn bench_models() -> Vec<Box<dyn Model>> {
    vec![
        Box::new(PlainIntegerModel::new()),
        Box::new(DeltaIntegerModel::new(0)),
        Box::new(PlainEnumModel::new(ENUM_DOMAIN).unwrap()),
        Box::new(PlainStringModel::new()),
    ]
}

/// Generates tuples shaped like an event log: monotone starts, short spans,
/// a small category domain, and short labels.
fn generate_tuples(count: usize) -> Vec<Tuple> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut start = 1_700_000_000i64;
    (0..count)
        .map(|_| {
            start += rng.random_range(1..60);
            let span = rng.random_range(0..300);
            let category = rng.random_range(0..ENUM_DOMAIN);
            Tuple::new(vec![
                AttrValue::Integer(start),
                AttrValue::Integer(start + span),
                AttrValue::Enum(category),
                AttrValue::String(format!("evt-{:04}", category * 7)),
            ])
        })
        .collect()
}

fn compress_all(tuples: &[Tuple], registry: &Arc<TypeRegistry>) -> Vec<u8> {
    let mut compressor = Compressor::new(
        Vec::new(),
        bench_schema(),
        bench_models(),
        vec![0, 1, 2, 3],
        registry.clone(),
        CodecConfig::default(),
    )
    .unwrap();
    for tuple in tuples {
        compressor.append_tuple(tuple).unwrap();
    }
    compressor.finish().unwrap()
}

fn decompress_all(bytes: &[u8], registry: &Arc<TypeRegistry>) -> Vec<Tuple> {
    let mut decompressor = Decompressor::from_reader(
        Cursor::new(bytes.to_vec()),
        bench_schema(),
        bench_models(),
        registry.clone(),
        CodecConfig::default(),
    )
    .unwrap();
    decompressor.init().unwrap();
    let mut tuples = Vec::with_capacity(BENCH_NUM_TUPLES);
    while decompressor.has_next() {
        tuples.push(decompressor.read_next_tuple().unwrap());
    }
    tuples
}

// --- Benchmark Suite ---

fn bench_tuple_roundtrip(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let tuples = generate_tuples(BENCH_NUM_TUPLES);
    let compressed = compress_all(&tuples, &registry);

    let mut group = c.benchmark_group("Tuple Stream Roundtrip");
    group.throughput(criterion::Throughput::Elements(BENCH_NUM_TUPLES as u64));

    group.bench_function("Compress (event-log shape)", |b| {
        b.iter(|| black_box(compress_all(black_box(&tuples), &registry)))
    });

    group.bench_function("Decompress (event-log shape)", |b| {
        b.iter(|| black_box(decompress_all(black_box(&compressed), &registry)))
    });

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_tuple_roundtrip);
criterion_main!(benches);
