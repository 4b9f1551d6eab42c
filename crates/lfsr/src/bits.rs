//! Dense bit vectors and row-major GF(2) matrices.
//!
//! Addition is XOR and multiplication is AND. A [`BitMatrix`] row holds one
//! linear form: bit `j` of row `i` set means input `j` is XORed into output
//! `i`. Storage is 64 bits per word, little-endian by bit index, so index 0 is
//! the least significant bit of word 0.
//!
//! # Example
//!
//! ```
//! use lfsr::{BitMatrix, BitVec};
//!
//! let m = BitMatrix::identity(4);
//! let v = BitVec::from_u64(0b1010, 4);
//! assert_eq!(m.mul_vec(&v), v);
//! ```

use alloc::vec::Vec;
use core::{fmt, ops::BitXorAssign};

const WORD_BITS: usize = 64;

#[inline]
const fn words_for(len: usize) -> usize {
  len.div_ceil(WORD_BITS)
}

// ─────────────────────────────────────────────────────────────────────────────
// BitVec
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-length vector over GF(2).
///
/// Bits at or beyond `len` are always zero, so word-level XOR, equality and
/// hashing never see stale data.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitVec {
  len: usize,
  words: Vec<u64>,
}

impl BitVec {
  /// All-zero vector of `len` bits.
  #[must_use]
  pub fn zeros(len: usize) -> Self {
    Self {
      len,
      words: alloc::vec![0; words_for(len)],
    }
  }

  /// All-ones vector of `len` bits.
  #[must_use]
  pub fn ones(len: usize) -> Self {
    let mut v = Self {
      len,
      words: alloc::vec![u64::MAX; words_for(len)],
    };
    v.clear_tail();
    v
  }

  /// Basis vector with only bit `index` set.
  ///
  /// # Panics
  ///
  /// Panics if `index >= len`.
  #[must_use]
  pub fn one_hot(len: usize, index: usize) -> Self {
    let mut v = Self::zeros(len);
    v.set(index, true);
    v
  }

  /// Pack a boolean slice; element 0 becomes bit 0.
  #[must_use]
  pub fn from_bools(bits: &[bool]) -> Self {
    let mut v = Self::zeros(bits.len());
    for (word, chunk) in v.words.iter_mut().zip(bits.chunks(WORD_BITS)) {
      *word = chunk
        .iter()
        .enumerate()
        .fold(0, |acc, (k, &bit)| acc | (u64::from(bit) << k));
    }
    v
  }

  /// Low `len` bits of `value`. Bits of `value` above `len` are dropped,
  /// and bits of the vector above 128 are zero.
  #[must_use]
  pub fn from_u128(value: u128, len: usize) -> Self {
    let mut v = Self::zeros(len);
    if let Some(w) = v.words.first_mut() {
      *w = value as u64;
    }
    if let Some(w) = v.words.get_mut(1) {
      *w = (value >> 64) as u64;
    }
    v.clear_tail();
    v
  }

  /// Low `len` bits of `value`.
  #[inline]
  #[must_use]
  pub fn from_u64(value: u64, len: usize) -> Self {
    Self::from_u128(u128::from(value), len)
  }

  /// Bytes read as a little-endian integer: bit `k` of `bytes[i]` is bit `8 * i + k`.
  #[must_use]
  pub fn from_le_bytes(bytes: &[u8]) -> Self {
    let mut v = Self::zeros(bytes.len() * 8);
    for (word, chunk) in v.words.iter_mut().zip(bytes.chunks(WORD_BITS / 8)) {
      *word = chunk
        .iter()
        .rev()
        .fold(0, |acc, &byte| (acc << 8) | u64::from(byte));
    }
    v
  }

  /// Bytes read as a big-endian integer: `bytes[0]` occupies the top 8 bits.
  #[must_use]
  pub fn from_be_bytes(bytes: &[u8]) -> Self {
    let mut v = Self::zeros(bytes.len() * 8);
    // Word 0 holds the last (least significant) eight bytes.
    for (word, chunk) in v.words.iter_mut().zip(bytes.rchunks(WORD_BITS / 8)) {
      *word = chunk.iter().fold(0, |acc, &byte| (acc << 8) | u64::from(byte));
    }
    v
  }

  /// Unpack into one `bool` per bit, bit 0 first.
  #[must_use]
  pub fn to_bools(&self) -> Vec<bool> {
    self.iter().collect()
  }

  /// Integer value of the vector, or `None` if it is longer than 128 bits.
  #[must_use]
  pub fn to_u128(&self) -> Option<u128> {
    if self.len > 128 {
      return None;
    }
    let lo = self.words.first().copied().unwrap_or(0);
    let hi = self.words.get(1).copied().unwrap_or(0);
    Some(u128::from(lo) | (u128::from(hi) << 64))
  }

  /// Integer value of the vector, or `None` if it is longer than 64 bits.
  #[must_use]
  pub fn to_u64(&self) -> Option<u64> {
    if self.len > 64 {
      return None;
    }
    Some(self.words.first().copied().unwrap_or(0))
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Bit `index`; out-of-range indices read as zero.
  #[inline]
  #[must_use]
  pub fn get(&self, index: usize) -> bool {
    index < self.len
      && self
        .words
        .get(index / WORD_BITS)
        .is_some_and(|w| (w >> (index % WORD_BITS)) & 1 != 0)
  }

  /// Set bit `index` to `value`.
  ///
  /// # Panics
  ///
  /// Panics if `index >= len`.
  #[inline]
  pub fn set(&mut self, index: usize, value: bool) {
    assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
    let mask = 1u64 << (index % WORD_BITS);
    if let Some(word) = self.words.get_mut(index / WORD_BITS) {
      if value {
        *word |= mask;
      } else {
        *word &= !mask;
      }
    }
  }

  /// Number of set bits.
  #[must_use]
  pub fn count_ones(&self) -> usize {
    self.words.iter().map(|w| w.count_ones() as usize).sum()
  }

  /// Parity of `self & other`: true iff an odd number of positions are set in both.
  ///
  /// This is the GF(2) inner product, one XOR reduction of a masked bus.
  #[inline]
  #[must_use]
  pub fn and_parity(&self, other: &Self) -> bool {
    let acc = self.words.iter().zip(&other.words).fold(0u64, |acc, (a, b)| acc ^ (a & b));
    acc.count_ones() & 1 == 1
  }

  /// Iterate bits from index 0 upward.
  pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
    (0..self.len).map(move |i| self.get(i))
  }

  /// Indices of set bits, ascending.
  pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
    self.words.iter().enumerate().flat_map(|(wi, &word)| {
      let mut w = word;
      core::iter::from_fn(move || {
        if w == 0 {
          return None;
        }
        let bit = w.trailing_zeros() as usize;
        w &= w - 1;
        Some(wi * WORD_BITS + bit)
      })
    })
  }

  /// Copy with bit `i` moved to `len - 1 - i`.
  #[must_use]
  pub fn reversed(&self) -> Self {
    let mut out = Self::zeros(self.len);
    for i in self.iter_ones() {
      out.set(self.len - 1 - i, true);
    }
    out
  }

  #[inline]
  fn clear_tail(&mut self) {
    let rem = self.len % WORD_BITS;
    if rem != 0 {
      if let Some(last) = self.words.last_mut() {
        *last &= (1u64 << rem) - 1;
      }
    }
  }
}

impl BitXorAssign<&BitVec> for BitVec {
  /// XOR `rhs` into `self`, keeping `self.len()`.
  ///
  /// A shorter `rhs` acts as if zero-extended; bits of a longer `rhs` at or
  /// beyond `self.len()` are dropped.
  #[inline]
  fn bitxor_assign(&mut self, rhs: &BitVec) {
    for (a, b) in self.words.iter_mut().zip(&rhs.words) {
      *a ^= b;
    }
    self.clear_tail();
  }
}

impl From<&[bool]> for BitVec {
  fn from(bits: &[bool]) -> Self {
    Self::from_bools(bits)
  }
}

/// Most significant bit first, like a binary literal.
impl fmt::Display for BitVec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for i in (0..self.len).rev() {
      f.write_str(if self.get(i) { "1" } else { "0" })?;
    }
    Ok(())
  }
}

impl fmt::Debug for BitVec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "BitVec({}'b{self})", self.len)
  }
}

/// Pack `bits` into an integer, element 0 least significant.
///
/// Returns `None` if more than 128 bits are given.
#[must_use]
pub fn bits_to_int(bits: &[bool]) -> Option<u128> {
  BitVec::from_bools(bits).to_u128()
}

/// Unpack the low `len` bits of `value`, least significant first.
#[must_use]
pub fn int_to_bits(value: u128, len: usize) -> Vec<bool> {
  BitVec::from_u128(value, len).to_bools()
}

// ─────────────────────────────────────────────────────────────────────────────
// BitMatrix
// ─────────────────────────────────────────────────────────────────────────────

/// Rectangular matrix over GF(2), stored as one [`BitVec`] per row.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitMatrix {
  cols: usize,
  rows: Vec<BitVec>,
}

impl BitMatrix {
  #[must_use]
  pub fn zeros(rows: usize, cols: usize) -> Self {
    Self {
      cols,
      rows: (0..rows).map(|_| BitVec::zeros(cols)).collect(),
    }
  }

  /// Ones on cells `(i, i)` for `i < min(rows, cols)`.
  #[must_use]
  pub fn diagonal(rows: usize, cols: usize) -> Self {
    let mut m = Self::zeros(rows, cols);
    for (i, row) in m.rows.iter_mut().take(cols).enumerate() {
      row.set(i, true);
    }
    m
  }

  #[inline]
  #[must_use]
  pub fn identity(n: usize) -> Self {
    Self::diagonal(n, n)
  }

  #[inline]
  #[must_use]
  pub fn rows(&self) -> usize {
    self.rows.len()
  }

  #[inline]
  #[must_use]
  pub const fn cols(&self) -> usize {
    self.cols
  }

  /// Row `index`.
  ///
  /// # Panics
  ///
  /// Panics if `index >= rows`.
  #[inline]
  #[must_use]
  #[allow(clippy::indexing_slicing)]
  pub fn row(&self, index: usize) -> &BitVec {
    &self.rows[index]
  }

  /// # Panics
  ///
  /// Panics if `index >= rows`.
  #[inline]
  #[allow(clippy::indexing_slicing)]
  pub(crate) fn row_mut(&mut self, index: usize) -> &mut BitVec {
    &mut self.rows[index]
  }

  pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &BitVec> + '_ {
    self.rows.iter()
  }

  /// Cell `(row, col)`; out-of-range cells read as zero.
  #[inline]
  #[must_use]
  pub fn get(&self, row: usize, col: usize) -> bool {
    self.rows.get(row).is_some_and(|r| r.get(col))
  }

  /// Matrix-vector product: bit `i` of the result is `parity(row_i & v)`.
  ///
  /// `v` must have `cols` bits.
  #[must_use]
  pub fn mul_vec(&self, v: &BitVec) -> BitVec {
    debug_assert_eq!(v.len(), self.cols);
    let mut out = BitVec::zeros(self.rows.len());
    for (i, row) in self.rows.iter().enumerate() {
      if row.and_parity(v) {
        out.set(i, true);
      }
    }
    out
  }

  /// Move every row down by one (row `k` takes row `k - 1`), drop the last
  /// row and install `incoming` as row 0.
  pub(crate) fn shift_in(&mut self, incoming: BitVec) {
    debug_assert_eq!(incoming.len(), self.cols);
    if self.rows.is_empty() {
      return;
    }
    self.rows.rotate_right(1);
    if let Some(first) = self.rows.first_mut() {
      *first = incoming;
    }
  }

  /// Copy with both row order and column order reversed.
  #[must_use]
  pub fn reversed(&self) -> Self {
    Self {
      cols: self.cols,
      rows: self.rows.iter().rev().map(BitVec::reversed).collect(),
    }
  }
}

/// One row per line, row 0 first, each row most significant column first.
impl fmt::Display for BitMatrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in &self.rows {
      writeln!(f, "{row}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for BitMatrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BitMatrix")
      .field("rows", &self.rows.len())
      .field("cols", &self.cols)
      .finish_non_exhaustive()
  }
}
