//! Bit-serial reference model.
//!
//! This module is the "source of truth" for the mask engine. It clocks a
//! concrete register one data bit at a time, exactly as the hardware
//! diagrams draw it, with no matrices involved:
//!
//! - **Obviously correct**: one shift, one feedback XOR per clock
//! - **Independent**: shares no code with the mask engine beyond [`Config`]
//! - **Slow**: O(width) per bit; use for oracles and test vectors only
//!
//! A parallel [`MaskBundle`](crate::MaskBundle) must produce the same
//! `(next_state, output)` as [`run`] for every input.

use crate::{
  bits::BitVec,
  config::{Config, Topology},
  eval::Evaluation,
};

/// One serial clock on a register in natural (MSB-first) numbering.
///
/// Shifts `data` in and returns the bit shifted out.
pub fn clock(config: &Config, state: &mut BitVec, data: bool) -> bool {
  let w = config.width();
  debug_assert_eq!(state.len(), w);

  let mut feedback = state.get(w - 1) ^ data;
  if config.topology() == Topology::Fibonacci {
    for j in config.taps() {
      feedback ^= state.get(j - 1);
    }
  }
  let incoming = if config.feed_forward() { data } else { feedback };

  for k in (1..w).rev() {
    let prev = state.get(k - 1);
    state.set(k, prev);
  }
  state.set(0, incoming);

  if config.topology() == Topology::Galois && incoming {
    for j in config.taps() {
      let cell = state.get(j);
      state.set(j, !cell);
    }
  }

  feedback
}

/// Clock `data.len()` bits through a register starting at `state`.
///
/// Follows the same bit numbering as a [`MaskBundle`](crate::MaskBundle) for
/// `config`, including `reverse`, so `run(cfg, s, d)` equals
/// `evaluate(&compute_masks(cfg), s, d)` whenever `d.len() == cfg.data_width()`.
///
/// # Panics
///
/// Panics if `state` does not have `config.width()` bits.
#[must_use]
pub fn run(config: &Config, state: &BitVec, data: &BitVec) -> Evaluation {
  assert_eq!(state.len(), config.width(), "state length");
  let d = data.len();

  let (mut reg, data) = if config.reverse() {
    (state.reversed(), data.reversed())
  } else {
    (state.clone(), data.clone())
  };

  let mut output = BitVec::zeros(d);
  for i in (0..d).rev() {
    let bit = clock(config, &mut reg, data.get(i));
    output.set(i, bit);
  }

  if config.reverse() {
    Evaluation {
      next_state: reg.reversed(),
      output: output.reversed(),
    }
  } else {
    Evaluation {
      next_state: reg,
      output,
    }
  }
}

/// Bitwise reflected CRC over bytes (LSB-first), Rocksoft style.
///
/// `poly_reflected` is the bit-reversed polynomial (e.g. `0xEDB8_8320` for
/// CRC-32). Returns the raw register; apply any final XOR yourself.
#[must_use]
// `i < data.len()` bounds every index; const fn cannot use iterators.
#[allow(clippy::indexing_slicing)]
pub const fn crc_reflected(poly_reflected: u64, width: u32, init: u64, data: &[u8]) -> u64 {
  let mask = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
  let mut crc = init & mask;
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u64;
    let mut bit = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly_reflected } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc & mask
}

/// Bitwise normal CRC over bytes (MSB-first). Requires `width >= 8`.
#[must_use]
// `i < data.len()` bounds every index; const fn cannot use iterators.
#[allow(clippy::indexing_slicing)]
pub const fn crc_normal(poly: u64, width: u32, init: u64, data: &[u8]) -> u64 {
  let mask = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
  let top = 1u64 << (width - 1);
  let mut crc = init & mask;
  let mut i = 0;
  while i < data.len() {
    crc ^= (data[i] as u64) << (width - 8);
    let mut bit = 0;
    while bit < 8 {
      crc = (if crc & top != 0 { (crc << 1) ^ poly } else { crc << 1 }) & mask;
      bit += 1;
    }
    i += 1;
  }
  crc
}

// Compile-time check values ("123456789").
const CHECK_INPUT: &[u8] = b"123456789";
const _: () = assert!(crc_reflected(0xEDB8_8320, 32, 0xFFFF_FFFF, CHECK_INPUT) ^ 0xFFFF_FFFF == 0xCBF4_3926);
const _: () = assert!(crc_reflected(0x82F6_3B78, 32, 0xFFFF_FFFF, CHECK_INPUT) ^ 0xFFFF_FFFF == 0xE306_9283);
const _: () = assert!(crc_reflected(0xA001, 16, 0xFFFF, CHECK_INPUT) == 0x4B37);
const _: () = assert!(crc_normal(0x1021, 16, 0x1D0F, CHECK_INPUT) == 0xE5CC);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::compute_masks;

  #[test]
  fn galois_clock_is_crc_step() {
    // x^4 + x + 1, state 0b1000, data 0: out = 1, state = 0b0011.
    let cfg = Config::galois(4, 1, 0b0011u32).unwrap();
    let mut s = BitVec::from_u64(0b1000, 4);
    assert!(clock(&cfg, &mut s, false));
    assert_eq!(s.to_u64(), Some(0b0011));
  }

  #[test]
  fn fibonacci_clock_matches_prbs7() {
    // PRBS7: new = s6 ^ s5.
    let cfg = Config::fibonacci(7, 1, 0x41u32).unwrap();
    let mut s = BitVec::from_u64(0b110_0000, 7);
    assert!(!clock(&cfg, &mut s, false));
    assert_eq!(s.to_u64(), Some(0b100_0000));
    assert!(clock(&cfg, &mut s, false));
    assert_eq!(s.to_u64(), Some(0b000_0001));
  }

  #[test]
  fn run_agrees_with_masks_on_crc32() {
    let cfg = Config::galois(32, 8, 0x04C1_1DB7u32).unwrap().with_reverse(true);
    let masks = compute_masks(&cfg);
    let mut via_masks = BitVec::ones(32);
    let mut via_serial = BitVec::ones(32);
    for &b in CHECK_INPUT {
      let data = BitVec::from_u64(b.into(), 8);
      via_masks = crate::evaluate(&masks, &via_masks, &data).unwrap().next_state;
      via_serial = run(&cfg, &via_serial, &data).next_state;
    }
    assert_eq!(via_masks, via_serial);
    assert_eq!(via_serial.to_u64(), Some(0xCBF4_3926 ^ 0xFFFF_FFFF));
  }

  #[test]
  fn reflected_reference_handles_wide_registers() {
    // CRC-64/XZ check value.
    let crc = crc_reflected(0xC96C_5795_D787_0F42, 64, u64::MAX, CHECK_INPUT) ^ u64::MAX;
    assert_eq!(crc, 0x995D_C9BB_DF19_39FA);
  }
}
