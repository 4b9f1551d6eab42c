//! Mask derivation and evaluation benchmarks.
//!
//! Run: `cargo bench -p lfsr`

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lfsr::{BitVec, MaskBundle, Register, compute_masks, evaluate, presets, reference};

/// Bus widths commonly found on SerDes and MAC datapaths.
const DATA_WIDTHS: [usize; 5] = [8, 32, 64, 128, 256];

/// Message size for the streaming benchmarks.
const STREAM_BYTES: usize = 4096;

fn bench_compute(c: &mut Criterion) {
  let mut group = c.benchmark_group("lfsr/compute_masks");

  for preset in [presets::CRC32, presets::PRBS31, presets::SCRAMBLER_64B66B] {
    for d in DATA_WIDTHS {
      let Ok(cfg) = preset.config(d) else { continue };
      group.bench_with_input(BenchmarkId::new(preset.name, d), &cfg, |b, cfg| {
        b.iter(|| black_box(compute_masks(cfg)));
      });
    }
  }

  group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
  let mut group = c.benchmark_group("lfsr/evaluate");

  for d in DATA_WIDTHS {
    let Ok(cfg) = presets::CRC32.config(d) else { continue };
    let masks = compute_masks(&cfg);
    let state = BitVec::ones(32);
    let data = BitVec::from_le_bytes(&vec![0xA5; d / 8]);
    group.throughput(Throughput::Bytes((d / 8) as u64));

    group.bench_with_input(BenchmarkId::from_parameter(d), &(state, data), |b, (state, data)| {
      b.iter(|| black_box(evaluate(&masks, state, data)));
    });
  }

  group.finish();
}

/// CRC-32 over a buffer: parallel register at several bus widths versus the
/// bitwise reference.
fn bench_stream(c: &mut Criterion) {
  let mut group = c.benchmark_group("lfsr/crc32_stream");
  let data = vec![0xABu8; STREAM_BYTES];
  group.throughput(Throughput::Bytes(STREAM_BYTES as u64));

  for d in DATA_WIDTHS {
    let Ok(cfg) = presets::CRC32.config(d) else { continue };
    let masks = MaskBundle::new(&cfg);
    group.bench_with_input(BenchmarkId::new("register", d), &data, |b, data| {
      b.iter(|| {
        let Ok(mut reg) = Register::new(&masks, presets::CRC32.seed()) else { return };
        let _ = black_box(reg.absorb(data));
      });
    });
  }

  group.bench_with_input(BenchmarkId::new("bitwise", 1), &data, |b, data| {
    b.iter(|| black_box(reference::crc_reflected(0xEDB8_8320, 32, 0xFFFF_FFFF, data)));
  });

  group.finish();
}

criterion_group!(benches, bench_compute, bench_evaluate, bench_stream);
criterion_main!(benches);
