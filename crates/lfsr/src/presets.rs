//! Common LFSR/CRC configurations.
//!
//! | Name | Configuration | Width | Polynomial | Initial value | Notes |
//! |------|---------------|-------|------------|---------------|-------|
//! | CRC16-IBM | Galois, bit-reverse | 16 | `0x8005` | `0xFFFF` | |
//! | CRC16-CCITT | Galois | 16 | `0x1021` | `0x1D0F` | |
//! | CRC32 | Galois, bit-reverse | 32 | `0x04C11DB7` | `0xFFFFFFFF` | Ethernet FCS; invert final output |
//! | CRC32C | Galois, bit-reverse | 32 | `0x1EDC6F41` | `0xFFFFFFFF` | iSCSI, SSE4.2 `crc32`; invert final output |
//! | PRBS6 | Fibonacci | 6 | `0x21` | any | |
//! | PRBS7 | Fibonacci | 7 | `0x41` | any | |
//! | PRBS9 | Fibonacci | 9 | `0x021` | any | ITU V.52 |
//! | PRBS10 | Fibonacci | 10 | `0x081` | any | ITU |
//! | PRBS11 | Fibonacci | 11 | `0x201` | any | ITU O.152 |
//! | PRBS15 | Fibonacci, inverted | 15 | `0x4001` | any | ITU O.152 |
//! | PRBS17 | Fibonacci | 17 | `0x04001` | any | |
//! | PRBS20 | Fibonacci | 20 | `0x00009` | any | ITU V.57 |
//! | PRBS23 | Fibonacci, inverted | 23 | `0x040001` | any | ITU O.151 |
//! | PRBS29 | Fibonacci, inverted | 29 | `0x08000001` | any | |
//! | PRBS31 | Fibonacci, inverted | 31 | `0x10000001` | any | |
//! | 64b66b | Fibonacci, bit-reverse | 58 | `0x8000000001` | any | 10G Ethernet scrambler |
//! | 128b130b | Galois, bit-reverse | 23 | `0x210125` | any | PCIe gen 3 scrambler |
//!
//! "any" means any non-zero seed; [`Preset::seed`] then returns all ones.
//!
//! # Example
//!
//! ```
//! use lfsr::{MaskBundle, Register, presets};
//!
//! let crc = presets::CRC32;
//! let masks = MaskBundle::new(&crc.config(8)?);
//! let mut reg = Register::new(&masks, crc.seed())?;
//! reg.absorb(b"123456789")?;
//! assert_eq!(crc.finish(reg.state()), Some(0xCBF4_3926));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
  bits::BitVec,
  config::{Config, Topology},
  error::ConfigError,
};

/// A named register definition, independent of bus width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Preset {
  pub name: &'static str,
  pub topology: Topology,
  pub width: usize,
  pub polynomial: u64,
  pub reverse: bool,
  /// Conventional initial register value; `None` if any non-zero seed works.
  pub init: Option<u64>,
  /// The final CRC value (or the PRBS output) is the bitwise complement.
  pub invert: bool,
}

impl Preset {
  /// Instantiate with a `data_width`-bit bus.
  pub fn config(&self, data_width: usize) -> Result<Config, ConfigError> {
    Ok(Config::new(self.topology, self.width, data_width, self.polynomial)?.with_reverse(self.reverse))
  }

  /// Initial register contents: `init`, or all ones.
  #[must_use]
  pub fn seed(&self) -> BitVec {
    match self.init {
      Some(init) => BitVec::from_u64(init, self.width),
      None => BitVec::ones(self.width),
    }
  }

  /// Final value of a register in this preset's convention: the state as an
  /// integer, complemented if `invert` is set. `None` if `state` is not
  /// `width` bits.
  #[must_use]
  pub fn finish(&self, state: &BitVec) -> Option<u64> {
    if state.len() != self.width {
      return None;
    }
    let value = state.to_u64()?;
    let mask = if self.width >= 64 { u64::MAX } else { (1u64 << self.width) - 1 };
    Some(if self.invert { !value & mask } else { value })
  }

  /// Case-insensitive lookup in [`ALL`].
  #[must_use]
  pub fn find(name: &str) -> Option<&'static Self> {
    let name = name.trim();
    ALL.iter().find(|p| p.name.eq_ignore_ascii_case(name))
  }
}

const fn galois(name: &'static str, width: usize, polynomial: u64, reverse: bool, init: u64, invert: bool) -> Preset {
  Preset {
    name,
    topology: Topology::Galois,
    width,
    polynomial,
    reverse,
    init: Some(init),
    invert,
  }
}

const fn prbs(name: &'static str, width: usize, polynomial: u64, invert: bool) -> Preset {
  Preset {
    name,
    topology: Topology::Fibonacci,
    width,
    polynomial,
    reverse: false,
    init: None,
    invert,
  }
}

pub const CRC16_IBM: Preset = galois("CRC16-IBM", 16, 0x8005, true, 0xFFFF, false);
pub const CRC16_CCITT: Preset = galois("CRC16-CCITT", 16, 0x1021, false, 0x1D0F, false);
pub const CRC32: Preset = galois("CRC32", 32, 0x04C1_1DB7, true, 0xFFFF_FFFF, true);
pub const CRC32C: Preset = galois("CRC32C", 32, 0x1EDC_6F41, true, 0xFFFF_FFFF, true);

pub const PRBS6: Preset = prbs("PRBS6", 6, 0x21, false);
pub const PRBS7: Preset = prbs("PRBS7", 7, 0x41, false);
pub const PRBS9: Preset = prbs("PRBS9", 9, 0x021, false);
pub const PRBS10: Preset = prbs("PRBS10", 10, 0x081, false);
pub const PRBS11: Preset = prbs("PRBS11", 11, 0x201, false);
pub const PRBS15: Preset = prbs("PRBS15", 15, 0x4001, true);
pub const PRBS17: Preset = prbs("PRBS17", 17, 0x0_4001, false);
pub const PRBS20: Preset = prbs("PRBS20", 20, 0x0_0009, false);
pub const PRBS23: Preset = prbs("PRBS23", 23, 0x04_0001, true);
pub const PRBS29: Preset = prbs("PRBS29", 29, 0x0800_0001, true);
pub const PRBS31: Preset = prbs("PRBS31", 31, 0x1000_0001, true);

pub const SCRAMBLER_64B66B: Preset = Preset {
  name: "64b66b",
  topology: Topology::Fibonacci,
  width: 58,
  polynomial: 0x80_0000_0001,
  reverse: true,
  init: None,
  invert: false,
};

pub const SCRAMBLER_128B130B: Preset = Preset {
  name: "128b130b",
  topology: Topology::Galois,
  width: 23,
  polynomial: 0x21_0125,
  reverse: true,
  init: None,
  invert: false,
};

pub const ALL: &[Preset] = &[
  CRC16_IBM,
  CRC16_CCITT,
  CRC32,
  CRC32C,
  PRBS6,
  PRBS7,
  PRBS9,
  PRBS10,
  PRBS11,
  PRBS15,
  PRBS17,
  PRBS20,
  PRBS23,
  PRBS29,
  PRBS31,
  SCRAMBLER_64B66B,
  SCRAMBLER_128B130B,
];

#[cfg(test)]
mod tests {
  use alloc::vec::Vec;

  use super::*;
  use crate::{MaskBundle, Register};

  fn checksum(preset: &Preset, data_width: usize, msg: &[u8]) -> Option<u64> {
    let masks = MaskBundle::new(&preset.config(data_width).unwrap());
    let mut reg = Register::new(&masks, preset.seed()).unwrap();
    reg.absorb(msg).unwrap();
    preset.finish(reg.state())
  }

  #[test]
  fn names_are_unique_and_findable() {
    let mut names: Vec<_> = ALL.iter().map(|p| p.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ALL.len());

    assert_eq!(Preset::find("crc32c"), Some(&CRC32C));
    assert_eq!(Preset::find(" 64B66B "), Some(&SCRAMBLER_64B66B));
    assert_eq!(Preset::find("crc8"), None);
  }

  #[test]
  fn every_preset_builds() {
    for preset in ALL {
      for d in [1, 8, 64] {
        let cfg = preset.config(d).unwrap();
        assert_eq!(cfg.width(), preset.width);
        assert_eq!(cfg.reverse(), preset.reverse);
        assert!(cfg.taps().count() >= 1, "{} has no taps", preset.name);
      }
      assert_eq!(preset.seed().len(), preset.width);
    }
  }

  #[test]
  fn crc_check_values() {
    assert_eq!(checksum(&CRC32, 8, b"123456789"), Some(0xCBF4_3926));
    assert_eq!(checksum(&CRC32C, 8, b"123456789"), Some(0xE306_9283));
    // CRC-16/MODBUS and CRC-16/SPI-FUJITSU in the RevEng catalogue.
    assert_eq!(checksum(&CRC16_IBM, 8, b"123456789"), Some(0x4B37));
    assert_eq!(checksum(&CRC16_CCITT, 8, b"123456789"), Some(0xE5CC));
  }

  #[test]
  fn crc_check_values_on_wide_bus() {
    let msg = b"12345678abcdefgh";
    for preset in [CRC32, CRC32C, CRC16_IBM, CRC16_CCITT] {
      let narrow = checksum(&preset, 8, msg);
      assert_eq!(checksum(&preset, 16, msg), narrow, "{}", preset.name);
      assert_eq!(checksum(&preset, 64, msg), narrow, "{}", preset.name);
    }
  }

  #[test]
  fn finish_checks_width() {
    assert_eq!(CRC32.finish(&BitVec::zeros(31)), None);
    assert_eq!(CRC32.finish(&BitVec::zeros(32)), Some(0xFFFF_FFFF));
    assert_eq!(PRBS9.finish(&BitVec::ones(9)), Some(0x1FF));
  }
}
