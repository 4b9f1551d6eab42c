//! Fuzz target: every derived bundle agrees with the bit-serial model.
//!
//! Covers both topologies, feed-forward, reversal, and widths that straddle
//! 64-bit word boundaries.

#![no_main]

use arbitrary::Arbitrary;
use lfsr::{BitVec, Config, Topology, compute_masks, evaluate, reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  galois: bool,
  width: u8,
  data_width: u8,
  polynomial: [u64; 2],
  feed_forward: bool,
  reverse: bool,
  state: Vec<u8>,
  data: Vec<u8>,
}

/// First `len` bits of `bytes`, zero-padded.
fn bits(bytes: &[u8], len: usize) -> BitVec {
  let mut v = BitVec::zeros(len);
  for i in 0..len.min(bytes.len() * 8) {
    v.set(i, (bytes[i / 8] >> (i % 8)) & 1 != 0);
  }
  v
}

fuzz_target!(|input: Input| {
  let width = usize::from(input.width % 100) + 1;
  let data_width = usize::from(input.data_width % 100) + 1;
  let topology = if input.galois { Topology::Galois } else { Topology::Fibonacci };
  let poly = u128::from(input.polynomial[0]) | (u128::from(input.polynomial[1]) << 64);

  let cfg = Config::new(topology, width, data_width, poly)
    .expect("non-zero widths")
    .with_feed_forward(input.feed_forward)
    .with_reverse(input.reverse);

  let state = bits(&input.state, width);
  let data = bits(&input.data, data_width);

  let parallel = evaluate(&compute_masks(&cfg), &state, &data).expect("shapes match");
  let serial = reference::run(&cfg, &state, &data);
  assert_eq!(parallel, serial, "engine/reference mismatch for {cfg}");
});
