//! Bit-exact application of a [`MaskBundle`].
//!
//! [`evaluate`] is one clock of the parallel register: a pure function from
//! `(state, data)` to `(next_state, output)`. [`Register`] wraps it into a
//! Mealy machine that feeds `next_state` back each tick.
//!
//! # Parallelism
//!
//! Evaluations against one bundle are independent, so batches of unrelated
//! `(state, data)` pairs can be spread over threads by the caller. This module
//! adds no runtime; bring rayon or `std::thread`:
//!
//! ```ignore
//! use rayon::prelude::*;
//!
//! let results: Vec<_> = inputs
//!   .par_iter()
//!   .map(|(state, data)| lfsr::evaluate(&masks, state, data))
//!   .collect();
//! ```
//!
//! Only a chain of ticks on the same register is ordered.

use alloc::vec::Vec;

use crate::{
  bits::BitVec,
  error::{Operand, ShapeMismatchError},
  mask::MaskBundle,
};

/// Result of one parallel clock.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Evaluation {
  /// Register contents after `data_width` serial shifts.
  pub next_state: BitVec,
  /// The `data_width` bits shifted out, first one at index `data_width - 1`
  /// (index 0 when the bundle is reversed).
  pub output: BitVec,
}

/// Apply `masks` to one `(state, data)` pair.
///
/// `state` must have `masks.width()` bits and `data` `masks.data_width()`.
pub fn evaluate(masks: &MaskBundle, state: &BitVec, data: &BitVec) -> Result<Evaluation, ShapeMismatchError> {
  ShapeMismatchError::check(Operand::State, masks.width(), state.len())?;
  ShapeMismatchError::check(Operand::Data, masks.data_width(), data.len())?;

  let mut next_state = masks.mask_state().mul_vec(state);
  next_state ^= &masks.mask_data().mul_vec(data);

  let mut output = masks.output_mask_state().mul_vec(state);
  output ^= &masks.output_mask_data().mul_vec(data);

  Ok(Evaluation { next_state, output })
}

/// [`evaluate`] over `bool` slices, bit 0 first. Returns `(next_state, output)`.
pub fn evaluate_bools(
  masks: &MaskBundle,
  state: &[bool],
  data: &[bool],
) -> Result<(Vec<bool>, Vec<bool>), ShapeMismatchError> {
  let eval = evaluate(masks, &BitVec::from_bools(state), &BitVec::from_bools(data))?;
  Ok((eval.next_state.to_bools(), eval.output.to_bools()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Register
// ─────────────────────────────────────────────────────────────────────────────

/// A parallel LFSR driven one bus word per tick.
///
/// # Example
///
/// PRBS9 generator, eight bits per tick, data input tied low:
///
/// ```
/// use lfsr::{BitVec, Config, MaskBundle, Register};
///
/// let masks = MaskBundle::new(&Config::fibonacci(9, 8, 0x021u32)?);
/// let mut prbs = Register::new(&masks, BitVec::ones(9))?;
/// let zero = BitVec::zeros(8);
///
/// let first = prbs.tick(&zero)?;
/// assert_eq!(first.to_u64(), Some(0x07));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Register<'a> {
  masks: &'a MaskBundle,
  state: BitVec,
}

impl<'a> Register<'a> {
  /// Start from `seed`, which must have `masks.width()` bits.
  pub fn new(masks: &'a MaskBundle, seed: BitVec) -> Result<Self, ShapeMismatchError> {
    ShapeMismatchError::check(Operand::State, masks.width(), seed.len())?;
    Ok(Self { masks, state: seed })
  }

  /// Advance one clock: consume `data`, return the output word.
  pub fn tick(&mut self, data: &BitVec) -> Result<BitVec, ShapeMismatchError> {
    let Evaluation { next_state, output } = evaluate(self.masks, &self.state, data)?;
    self.state = next_state;
    Ok(output)
  }

  /// Clock `data_width` bits per tick out of `bytes`, which must be a whole
  /// number of bus words, and return the output words.
  ///
  /// Each word is packed little-endian for reversed (LSB-first) registers
  /// and big-endian otherwise, so the byte stream is consumed in order with
  /// the bit order the register expects.
  ///
  /// # Errors
  ///
  /// [`ShapeMismatchError`] on [`Operand::Data`], with `expected` the bus
  /// width and `actual` the size of the word that could not be formed:
  ///
  /// - bus width not a multiple of 8: the smallest whole-byte word covering
  ///   the bus (`12` vs `16` for a 12-bit bus);
  /// - `bytes` not a whole number of words: the leftover tail (`16` vs `8`
  ///   for three bytes on a 16-bit bus).
  ///
  /// Nothing is clocked on error.
  pub fn absorb(&mut self, bytes: &[u8]) -> Result<Vec<BitVec>, ShapeMismatchError> {
    let d = self.masks.data_width();
    if d % 8 != 0 {
      return Err(ShapeMismatchError::new(Operand::Data, d, d.next_multiple_of(8)));
    }
    let tail = (bytes.len() * 8) % d;
    if tail != 0 {
      return Err(ShapeMismatchError::new(Operand::Data, d, tail));
    }
    let reversed = self.masks.is_reversed();
    bytes
      .chunks(d / 8)
      .map(|word| {
        let data = if reversed {
          BitVec::from_le_bytes(word)
        } else {
          BitVec::from_be_bytes(word)
        };
        self.tick(&data)
      })
      .collect()
  }

  #[inline]
  #[must_use]
  pub const fn state(&self) -> &BitVec {
    &self.state
  }

  #[inline]
  #[must_use]
  pub fn into_state(self) -> BitVec {
    self.state
  }

  #[inline]
  #[must_use]
  pub const fn masks(&self) -> &'a MaskBundle {
    self.masks
  }
}

#[cfg(test)]
mod tests {
  use alloc::string::ToString;

  use super::*;
  use crate::{Config, compute_masks};

  #[test]
  fn rejects_wrong_lengths() {
    let masks = compute_masks(&Config::galois(16, 8, 0x8005u32).unwrap());
    let err = evaluate(&masks, &BitVec::zeros(15), &BitVec::zeros(8)).unwrap_err();
    assert_eq!(err, ShapeMismatchError::new(Operand::State, 16, 15));
    let err = evaluate(&masks, &BitVec::zeros(16), &BitVec::zeros(9)).unwrap_err();
    assert_eq!(err, ShapeMismatchError::new(Operand::Data, 8, 9));
    assert!(Register::new(&masks, BitVec::zeros(17)).is_err());
  }

  #[test]
  fn bool_interface_matches_bitvec() {
    let masks = compute_masks(&Config::fibonacci(7, 4, 0x41u32).unwrap());
    let state = [true, false, true, true, false, false, true];
    let data = [false, true, true, false];
    let (next, out) = evaluate_bools(&masks, &state, &data).unwrap();
    let eval = evaluate(&masks, &BitVec::from_bools(&state), &BitVec::from_bools(&data)).unwrap();
    assert_eq!(BitVec::from_bools(&next), eval.next_state);
    assert_eq!(BitVec::from_bools(&out), eval.output);
    assert!(evaluate_bools(&masks, &state[..6], &data).is_err());
  }

  #[test]
  fn zero_in_zero_out() {
    let masks = compute_masks(&Config::galois(32, 32, 0x04C1_1DB7u32).unwrap().with_reverse(true));
    let eval = evaluate(&masks, &BitVec::zeros(32), &BitVec::zeros(32)).unwrap();
    assert_eq!(eval.next_state.count_ones(), 0);
    assert_eq!(eval.output.count_ones(), 0);
  }

  #[test]
  fn tick_feeds_state_back() {
    let masks = compute_masks(&Config::fibonacci(9, 8, 0x021u32).unwrap());
    let mut reg = Register::new(&masks, BitVec::ones(9)).unwrap();
    let zero = BitVec::zeros(8);
    let first = reg.tick(&zero).unwrap();
    let second = reg.tick(&zero).unwrap();

    let e1 = evaluate(&masks, &BitVec::ones(9), &zero).unwrap();
    let e2 = evaluate(&masks, &e1.next_state, &zero).unwrap();
    assert_eq!(first, e1.output);
    assert_eq!(second, e2.output);
    assert_eq!(reg.state(), &e2.next_state);
  }

  #[test]
  fn absorb_requires_whole_words() {
    let masks = compute_masks(&Config::galois(32, 16, 0x04C1_1DB7u32).unwrap());
    let mut reg = Register::new(&masks, BitVec::ones(32)).unwrap();
    assert_eq!(
      reg.absorb(&[1, 2, 3]).unwrap_err(),
      ShapeMismatchError::new(Operand::Data, 16, 8)
    );
    assert_eq!(reg.state(), &BitVec::ones(32));
    assert_eq!(reg.absorb(&[1, 2, 3, 4]).unwrap().len(), 2);
    assert!(reg.absorb(&[]).unwrap().is_empty());

    let odd = compute_masks(&Config::galois(32, 12, 0x04C1_1DB7u32).unwrap());
    let mut reg = Register::new(&odd, BitVec::ones(32)).unwrap();
    let err = reg.absorb(&[0; 3]).unwrap_err();
    assert_eq!(err, ShapeMismatchError::new(Operand::Data, 12, 16));
    assert_eq!(err.to_string(), "data vector has 16 bits, expected 12");
  }
}
