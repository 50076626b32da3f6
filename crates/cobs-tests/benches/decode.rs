use cobs_decoder::{DecodeContext, Deframer, decode};
use cobs_encoder::{encode_frame, encode_to_vec};
use cobs_tests::{nonzero_payload, sparse_zero_payload};
use cobs_wire::FramingConfig;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_decode_small(c: &mut Criterion) {
    let encoded = encode_to_vec(b"Hello\x00w\x00rld");
    let mut dst = [0u8; 11];

    c.bench_function("decode_small", |b| {
        b.iter(|| decode(&encoded, &mut dst).unwrap());
    });
}

fn bench_decode_bytewise(c: &mut Criterion) {
    // The per-byte path an interrupt handler takes.
    let src = nonzero_payload(1024);
    let encoded = encode_to_vec(&src);
    let mut ctx = DecodeContext::start(vec![0u8; src.len()]);

    let mut group = c.benchmark_group("decode_bytewise");
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("step", |b| {
        b.iter(|| {
            ctx.restart();
            for &byte in &encoded {
                ctx.step(byte);
            }
            ctx.finish().unwrap()
        });
    });
    group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_throughput");

    for size_kb in [1, 10, 100] {
        let src = sparse_zero_payload(size_kb * 1024, 64);
        let encoded = encode_to_vec(&src);
        let mut dst = vec![0u8; src.len()];

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode", format!("{size_kb}kb")),
            &encoded,
            |b, e| b.iter(|| decode(e, &mut dst).unwrap()),
        );
    }

    group.finish();
}

fn bench_deframer(c: &mut Criterion) {
    let wire: Vec<u8> = (0..64)
        .flat_map(|i| encode_frame(&sparse_zero_payload(200 + i, 9)))
        .collect();
    let mut deframer = Deframer::new(FramingConfig::default());

    let mut group = c.benchmark_group("deframer");
    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("feed_64_frames", |b| {
        b.iter(|| deframer.feed(&wire).len());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_bytewise,
    bench_decode_throughput,
    bench_deframer
);
criterion_main!(benches);
