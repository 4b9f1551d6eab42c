//! Fuzz target: CRC-32/CRC-32C registers are bus-width independent.
//!
//! Absorbs the same buffer at 8, 16, 32 and 64 bits per tick and compares
//! against the bitwise reflected CRC.

#![no_main]

use arbitrary::Arbitrary;
use lfsr::{MaskBundle, Register, presets, reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  castagnoli: bool,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let (preset, reflected) = if input.castagnoli {
    (presets::CRC32C, 0x82F6_3B78)
  } else {
    (presets::CRC32, 0xEDB8_8320)
  };

  // Whole 64-bit words so every bus width sees the same bytes.
  let len = input.data.len() / 8 * 8;
  let data = &input.data[..len];
  let expected = reference::crc_reflected(reflected, 32, 0xFFFF_FFFF, data);

  for d in [8, 16, 32, 64] {
    let masks = MaskBundle::new(&preset.config(d).expect("valid preset"));
    let mut reg = Register::new(&masks, preset.seed()).expect("seed width");
    reg.absorb(data).expect("whole words");
    assert_eq!(reg.state().to_u64(), Some(expected), "{} D={d} len={len}", preset.name);
  }
});
