//! Benchmark – `cp437modem::Cp437Decoder`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions};

/// Deterministic ANSI art screen of exactly `target_len` bytes: colored box
/// drawing rows, each followed by a reset and CRLF.
fn make_screen(target_len: usize) -> Vec<u8> {
    const ROW: &[u8] = b"\x1b[1;33;44m\xc9\xcd\xcd\xcd\xcd\xbb \x03\x04\x05\x06 \xb0\xb1\xb2\xdb\x1b[0m\r\n";
    let mut out = Vec::with_capacity(target_len);
    while out.len() < target_len {
        let take = ROW.len().min(target_len - out.len());
        out.extend_from_slice(&ROW[..take]);
    }
    out
}

/// Feed `payload` in `parts` chunks and return the number of decoded chars.
fn run_decoder(table: &CodepageTable, payload: &[u8], parts: usize) -> usize {
    let chunk_size = payload.len().div_ceil(parts);
    let mut decoder = Cp437Decoder::new(table, DecoderOptions::default());
    let mut produced = 0;
    for chunk in payload.chunks(chunk_size) {
        produced += decoder.feed(chunk).chars().count();
    }
    produced
}

fn bench_decode_chunks(c: &mut Criterion) {
    let table = CodepageTable::cp437();
    let payload = make_screen(64 * 1024);

    let mut group = c.benchmark_group("decode_chunks");
    for &parts in &[1usize, 64, 4_096] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &p| {
            b.iter(|| black_box(run_decoder(&table, black_box(&payload), p)));
        });
    }
    group.bench_function("encode", |b| {
        let text = table.decode_all(&payload);
        b.iter(|| black_box(table.encode(black_box(&text))));
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_decode_chunks }
criterion_main!(benches);
