//! Benchmarks for the block and text codecs.
//!
//! Run with: cargo bench -p cfconfig-core

use cfconfig_core::{BinaryCodec, ConfigBlockService, ConfigRecord, RadioSpeed, TextCodec};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn sample_record() -> ConfigRecord {
    ConfigRecord {
        version: 0,
        radio_channel: 80,
        radio_speed: RadioSpeed::Speed2M,
        pitch_trim: 1.25,
        roll_trim: -0.5,
    }
}

/// Benchmark binary encode and decode
fn bench_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary");
    let codec = BinaryCodec::new();
    let record = sample_record();
    let block = codec.encode(&record);

    group.bench_function("encode", |b| b.iter(|| codec.encode(black_box(&record))));
    group.bench_function("decode", |b| {
        b.iter(|| codec.decode(black_box(&block)).unwrap())
    });
    group.bench_function("decode_erased", |b| {
        b.iter(|| codec.decode(black_box(&[0u8; 16])).is_err())
    });

    group.finish();
}

/// Benchmark text read and write
fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let codec = TextCodec::new();
    let record = sample_record();
    let text = codec.write(&record);

    group.bench_function("write", |b| b.iter(|| codec.write(black_box(&record))));
    group.bench_function("read", |b| b.iter(|| codec.read(black_box(&text)).unwrap()));

    group.finish();
}

/// Benchmark the full generate/extract pipeline
fn bench_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("service");
    let service = ConfigBlockService::new();
    let text = TextCodec::new().write(&sample_record());
    let block = service.generate(&text).unwrap();

    group.bench_function("generate", |b| {
        b.iter(|| service.generate(black_box(&text)).unwrap())
    });
    group.bench_function("extract", |b| {
        b.iter(|| service.extract(black_box(&block)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_binary, bench_text, bench_service);
criterion_main!(benches);
