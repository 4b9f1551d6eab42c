//! LFSR/CRC instance description.
//!
//! A [`Config`] is validated once at construction and is immutable
//! afterwards; the `with_*` methods return modified copies. Configs are
//! `Eq + Hash` so they can key a mask cache.
//!
//! # Polynomial convention
//!
//! Bit `j` of the polynomial is the coefficient of `x^j`. The leading term
//! `x^width` is implicit and bit 0 is never consulted, so only bits
//! `1..width` act as taps. CRC-32 is `0x04C1_1DB7` with `width = 32`.
//!
//! # Example
//!
//! ```
//! use lfsr::{Config, Topology};
//!
//! let crc32 = Config::galois(32, 8, 0x04C1_1DB7u32)?.with_reverse(true);
//! assert_eq!(crc32.topology(), Topology::Galois);
//!
//! let same = Config::build(32, 8, 0x04C1_1DB7u32, "GALOIS", false, true)?;
//! assert_eq!(crc32, same);
//! # Ok::<(), lfsr::ConfigError>(())
//! ```

use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Topology
// ─────────────────────────────────────────────────────────────────────────────

/// Where feedback enters the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topology {
  /// Taps are XORed together once and shifted in at bit 0.
  ///
  /// Usual for PRBS generators, scramblers and descramblers.
  Fibonacci,
  /// The shifted-out value is XORed into every tapped cell.
  ///
  /// Usual for CRC generators and checkers.
  Galois,
}

impl Topology {
  pub const ALL: [Self; 2] = [Self::Fibonacci, Self::Galois];

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Fibonacci => "fibonacci",
      Self::Galois => "galois",
    }
  }

  /// Case-insensitive name lookup.
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    let s = s.trim();
    Self::ALL.into_iter().find(|t| s.eq_ignore_ascii_case(t.as_str()))
  }
}

impl FromStr for Topology {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s).ok_or(ConfigError::UnknownTopology)
  }
}

impl fmt::Display for Topology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────────────────────────────────────

/// Feedback polynomial of any degree, as little-endian 64-bit words.
///
/// Trailing zero words are trimmed so equal tap sets compare and hash equal
/// however they were built.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<u64>", into = "Vec<u64>"))]
pub struct Polynomial {
  words: Vec<u64>,
}

impl Polynomial {
  #[must_use]
  pub fn from_words(mut words: Vec<u64>) -> Self {
    while words.last() == Some(&0) {
      words.pop();
    }
    Self { words }
  }

  #[must_use]
  pub fn words(&self) -> &[u64] {
    &self.words
  }

  /// Coefficient of `x^j`.
  #[inline]
  #[must_use]
  pub fn bit(&self, j: usize) -> bool {
    self.words.get(j / 64).is_some_and(|w| (w >> (j % 64)) & 1 != 0)
  }

  /// Tap positions that take part in a `width`-bit register: every set bit
  /// in `1..width`, ascending.
  pub fn taps(&self, width: usize) -> impl Iterator<Item = usize> + '_ {
    (1..width).filter(move |&j| self.bit(j))
  }

  /// The polynomial as an integer, if it fits.
  #[must_use]
  pub fn to_u128(&self) -> Option<u128> {
    match self.words.as_slice() {
      [] => Some(0),
      [lo] => Some(u128::from(*lo)),
      [lo, hi] => Some(u128::from(*lo) | (u128::from(*hi) << 64)),
      _ => None,
    }
  }
}

impl From<Vec<u64>> for Polynomial {
  fn from(words: Vec<u64>) -> Self {
    Self::from_words(words)
  }
}

impl From<Polynomial> for Vec<u64> {
  fn from(poly: Polynomial) -> Self {
    poly.words
  }
}

impl From<u128> for Polynomial {
  fn from(value: u128) -> Self {
    Self::from_words(alloc::vec![value as u64, (value >> 64) as u64])
  }
}

impl From<u64> for Polynomial {
  fn from(value: u64) -> Self {
    Self::from_words(alloc::vec![value])
  }
}

impl From<u32> for Polynomial {
  fn from(value: u32) -> Self {
    Self::from(u64::from(value))
  }
}

impl fmt::Debug for Polynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Polynomial({self})")
  }
}

/// Hexadecimal, most significant word first.
impl fmt::Display for Polynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut words = self.words.iter().rev();
    match words.next() {
      None => f.write_str("0x0"),
      Some(top) => {
        write!(f, "{top:#x}")?;
        for w in words {
          write!(f, "_{w:016x}")?;
        }
        Ok(())
      }
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

/// One validated LFSR/CRC instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ConfigSpec"))]
pub struct Config {
  width: usize,
  data_width: usize,
  polynomial: Polynomial,
  topology: Topology,
  feed_forward: bool,
  reverse: bool,
}

impl Config {
  /// Validate and build a feedback (non feed-forward), MSB-first config.
  pub fn new(
    topology: Topology,
    width: usize,
    data_width: usize,
    polynomial: impl Into<Polynomial>,
  ) -> Result<Self, ConfigError> {
    if width == 0 {
      return Err(ConfigError::ZeroWidth);
    }
    if data_width == 0 {
      return Err(ConfigError::ZeroDataWidth);
    }
    Ok(Self {
      width,
      data_width,
      polynomial: polynomial.into(),
      topology,
      feed_forward: false,
      reverse: false,
    })
  }

  #[inline]
  pub fn fibonacci(width: usize, data_width: usize, polynomial: impl Into<Polynomial>) -> Result<Self, ConfigError> {
    Self::new(Topology::Fibonacci, width, data_width, polynomial)
  }

  #[inline]
  pub fn galois(width: usize, data_width: usize, polynomial: impl Into<Polynomial>) -> Result<Self, ConfigError> {
    Self::new(Topology::Galois, width, data_width, polynomial)
  }

  /// Build from loosely typed parameters, parsing `topology` case-insensitively.
  pub fn build(
    width: usize,
    data_width: usize,
    polynomial: impl Into<Polynomial>,
    topology: &str,
    feed_forward: bool,
    reverse: bool,
  ) -> Result<Self, ConfigError> {
    let topology = topology.parse::<Topology>()?;
    Ok(
      Self::new(topology, width, data_width, polynomial)?
        .with_feed_forward(feed_forward)
        .with_reverse(reverse),
    )
  }

  #[inline]
  #[must_use]
  pub fn with_feed_forward(mut self, feed_forward: bool) -> Self {
    self.feed_forward = feed_forward;
    self
  }

  #[inline]
  #[must_use]
  pub fn with_reverse(mut self, reverse: bool) -> Self {
    self.reverse = reverse;
    self
  }

  /// Same register with a different bus width.
  pub fn with_data_width(mut self, data_width: usize) -> Result<Self, ConfigError> {
    if data_width == 0 {
      return Err(ConfigError::ZeroDataWidth);
    }
    self.data_width = data_width;
    Ok(self)
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> usize {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn data_width(&self) -> usize {
    self.data_width
  }

  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> &Polynomial {
    &self.polynomial
  }

  #[inline]
  #[must_use]
  pub const fn topology(&self) -> Topology {
    self.topology
  }

  #[inline]
  #[must_use]
  pub const fn feed_forward(&self) -> bool {
    self.feed_forward
  }

  #[inline]
  #[must_use]
  pub const fn reverse(&self) -> bool {
    self.reverse
  }

  /// Tap positions for this register width.
  pub fn taps(&self) -> impl Iterator<Item = usize> + '_ {
    self.polynomial.taps(self.width)
  }
}

impl fmt::Display for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} width={} data_width={} poly={}",
      self.topology, self.width, self.data_width, self.polynomial
    )?;
    if self.feed_forward {
      f.write_str(" feed-forward")?;
    }
    if self.reverse {
      f.write_str(" reverse")?;
    }
    Ok(())
  }
}

/// Unvalidated wire form; deserialization goes through [`Config::build`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ConfigSpec {
  width: usize,
  data_width: usize,
  polynomial: Polynomial,
  topology: alloc::string::String,
  #[serde(default)]
  feed_forward: bool,
  #[serde(default)]
  reverse: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<ConfigSpec> for Config {
  type Error = ConfigError;

  fn try_from(spec: ConfigSpec) -> Result<Self, Self::Error> {
    Self::build(
      spec.width,
      spec.data_width,
      spec.polynomial,
      &spec.topology,
      spec.feed_forward,
      spec.reverse,
    )
  }
}

#[cfg(test)]
mod tests {
  use alloc::{string::ToString, vec, vec::Vec};

  use super::*;

  #[test]
  fn topology_parse_is_case_insensitive() {
    assert_eq!(Topology::parse("Galois"), Some(Topology::Galois));
    assert_eq!(Topology::parse(" FIBONACCI "), Some(Topology::Fibonacci));
    assert_eq!("fibonacci".parse::<Topology>(), Ok(Topology::Fibonacci));
    assert_eq!("lfsr".parse::<Topology>(), Err(ConfigError::UnknownTopology));
  }

  #[test]
  fn rejects_zero_widths() {
    assert_eq!(Config::galois(0, 8, 1u32), Err(ConfigError::ZeroWidth));
    assert_eq!(Config::fibonacci(8, 0, 1u32), Err(ConfigError::ZeroDataWidth));
    assert_eq!(
      Config::build(0, 0, 0u32, "galois", false, false),
      Err(ConfigError::ZeroWidth)
    );
  }

  #[test]
  fn build_rejects_unknown_topology() {
    assert_eq!(
      Config::build(8, 8, 0x1Du32, "ring", false, false),
      Err(ConfigError::UnknownTopology)
    );
  }

  #[test]
  fn factories_match_build() {
    let a = Config::fibonacci(9, 8, 0x021u32).unwrap();
    let b = Config::build(9, 8, 0x021u32, "Fibonacci", false, false).unwrap();
    assert_eq!(a, b);
    assert!(!a.feed_forward() && !a.reverse());

    let c = Config::build(9, 8, 0x021u32, "fibonacci", true, true).unwrap();
    assert_eq!(c, a.with_feed_forward(true).with_reverse(true));
  }

  #[test]
  fn with_data_width_revalidates() {
    let c = Config::galois(32, 8, 0x04C1_1DB7u32).unwrap();
    assert_eq!(c.clone().with_data_width(64).unwrap().data_width(), 64);
    assert_eq!(c.with_data_width(0), Err(ConfigError::ZeroDataWidth));
  }

  #[test]
  fn taps_ignore_bit_zero_and_leading_term() {
    // x^8 + x^4 + x^3 + x^2 + 1 written with the leading term included.
    let c = Config::galois(8, 8, 0x11Du32).unwrap();
    assert_eq!(c.taps().collect::<Vec<_>>(), vec![2, 3, 4]);
  }

  #[test]
  fn polynomial_normalizes_words() {
    assert_eq!(Polynomial::from(0x8005u32), Polynomial::from_words(vec![0x8005, 0, 0]));
    assert_eq!(Polynomial::from(0u64).words(), &[] as &[u64]);
    let wide = Polynomial::from((1u128 << 100) | 3);
    assert!(wide.bit(100) && wide.bit(1) && !wide.bit(2));
    assert_eq!(wide.to_u128(), Some((1u128 << 100) | 3));
    assert_eq!(Polynomial::from_words(vec![1, 2, 3]).to_u128(), None);
  }

  #[test]
  fn polynomial_taps_beyond_u128() {
    let mut words = vec![0u64; 3];
    words[2] = 1 << 5; // x^133
    let p = Polynomial::from_words(words);
    assert_eq!(p.taps(200).collect::<Vec<_>>(), vec![133]);
    assert_eq!(p.taps(133).count(), 0);
  }

  #[test]
  fn display_forms() {
    assert_eq!(Polynomial::from(0x04C1_1DB7u32).to_string(), "0x4c11db7");
    assert_eq!(Polynomial::default().to_string(), "0x0");
    let c = Config::galois(32, 8, 0x04C1_1DB7u32).unwrap().with_reverse(true);
    assert_eq!(c.to_string(), "galois width=32 data_width=8 poly=0x4c11db7 reverse");
  }
}
