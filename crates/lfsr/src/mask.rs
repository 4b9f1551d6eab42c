//! Symbolic unrolling of a serial LFSR into parallel XOR masks.
//!
//! Every register bit and every data bit is treated as an independent GF(2)
//! basis vector. The register is clocked `data_width` times *symbolically*:
//! instead of bits, each cell holds the linear form (a `(state, data)` pair of
//! masks) that it would contain after that many serial steps. The final forms
//! are the next-state masks; the forms shifted out along the way are the
//! output masks.
//!
//! # Conventions
//!
//! - Data is consumed MSB first: step `i` consumes data bit `data_width - 1 - i`.
//! - The first serially emitted output lands on output bit `data_width - 1`.
//! - `reverse` reflects register, data and output numbering once all steps
//!   are done, which yields LSB-first (reflected) operation.
//!
//! ```text
//! Fibonacci                                   Galois
//!  DIN ──►(+)◄──────────(+)◄─────────┐         ┌──────────┬──────────┬──(+)◄── DIN
//!          │             ▲            │         │          ▼          │    ▲
//!          ├─►[0]─►…─►[j-1]─►[j]─►…─►[W-1]      └►[0]─►…─►(+)►[j]─►…─►[W-1]
//!          ▼                                                          └──► DOUT
//!         DOUT
//! ```
//!
//! # Example
//!
//! ```
//! use lfsr::{BitVec, Config, compute_masks, evaluate};
//!
//! let cfg = Config::galois(32, 8, 0x04C1_1DB7u32)?.with_reverse(true);
//! let masks = compute_masks(&cfg);
//!
//! let mut state = BitVec::ones(32);
//! for &byte in b"123456789" {
//!   state = evaluate(&masks, &state, &BitVec::from_u64(byte.into(), 8))?.next_state;
//! }
//! assert_eq!(state.to_u64().map(|s| !s as u32), Some(0xCBF4_3926));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
  bits::{BitMatrix, BitVec},
  config::{Config, Topology},
};

// ─────────────────────────────────────────────────────────────────────────────
// Verbosity
// ─────────────────────────────────────────────────────────────────────────────

/// How much the engine reports through the `log` facade while deriving masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trace {
  /// Emit nothing.
  #[default]
  Off,
  /// One `debug` record per derivation with the final mask densities.
  Summary,
  /// `Summary`, plus one `trace` record per symbolic step and the matrices.
  Steps,
}

impl Trace {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Off => "off",
      Self::Summary => "summary",
      Self::Steps => "steps",
    }
  }

  /// Case-insensitive name lookup.
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    let s = s.trim();
    let any = |names: &[&str]| names.iter().any(|n| s.eq_ignore_ascii_case(n));
    if any(&["off", "none", "0"]) {
      Some(Self::Off)
    } else if any(&["summary", "debug", "1"]) {
      Some(Self::Summary)
    } else if any(&["steps", "trace", "2"]) {
      Some(Self::Steps)
    } else {
      None
    }
  }

  #[inline]
  const fn summary(self) -> bool {
    !matches!(self, Self::Off)
  }

  #[inline]
  const fn steps(self) -> bool {
    matches!(self, Self::Steps)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// MaskBundle
// ─────────────────────────────────────────────────────────────────────────────

/// The four XOR mask matrices of a parallel LFSR.
///
/// | Matrix | Shape | Row `i` selects |
/// |---|---|---|
/// | [`mask_state`](Self::mask_state) | `W × W` | state bits feeding next-state bit `i` |
/// | [`mask_data`](Self::mask_data) | `W × D` | data bits feeding next-state bit `i` |
/// | [`output_mask_state`](Self::output_mask_state) | `D × W` | state bits feeding output bit `i` |
/// | [`output_mask_data`](Self::output_mask_data) | `D × D` | data bits feeding output bit `i` |
///
/// A bundle is a pure function of its [`Config`]; it is immutable once built
/// and can be shared freely across threads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaskBundle {
  width: usize,
  data_width: usize,
  reverse: bool,
  mask_state: BitMatrix,
  mask_data: BitMatrix,
  output_mask_state: BitMatrix,
  output_mask_data: BitMatrix,
}

/// The combined mask for one output signal of the combinational block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskRow<'a> {
  /// Current-state bits XORed into this signal.
  pub state: &'a BitVec,
  /// Data bits XORed into this signal.
  pub data: &'a BitVec,
}

impl MaskRow<'_> {
  /// Number of inputs of the XOR reduction implementing this signal.
  #[inline]
  #[must_use]
  pub fn fan_in(&self) -> usize {
    self.state.count_ones() + self.data.count_ones()
  }

  /// `parity(state & mask.state) ^ parity(data & mask.data)`.
  #[inline]
  #[must_use]
  pub fn apply(&self, state: &BitVec, data: &BitVec) -> bool {
    self.state.and_parity(state) ^ self.data.and_parity(data)
  }
}

impl MaskBundle {
  /// Derive the masks for `config`. Equivalent to [`compute_masks`].
  #[inline]
  #[must_use]
  pub fn new(config: &Config) -> Self {
    compute_masks(config)
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

  /// Whether numbering was reflected (LSB-first operation).
  #[inline]
  #[must_use]
  pub const fn is_reversed(&self) -> bool {
    self.reverse
  }

  #[inline]
  #[must_use]
  pub const fn mask_state(&self) -> &BitMatrix {
    &self.mask_state
  }

  #[inline]
  #[must_use]
  pub const fn mask_data(&self) -> &BitMatrix {
    &self.mask_data
  }

  #[inline]
  #[must_use]
  pub const fn output_mask_state(&self) -> &BitMatrix {
    &self.output_mask_state
  }

  #[inline]
  #[must_use]
  pub const fn output_mask_data(&self) -> &BitMatrix {
    &self.output_mask_data
  }

  /// Mask of signal `index`: next-state bit `index` for `index < width`,
  /// output bit `index - width` for `width <= index < width + data_width`.
  #[must_use]
  pub fn row(&self, index: usize) -> Option<MaskRow<'_>> {
    (index < self.width + self.data_width).then(|| self.signal(index))
  }

  /// All `width + data_width` signal masks, next-state bits first.
  pub fn rows(&self) -> impl ExactSizeIterator<Item = MaskRow<'_>> + '_ {
    (0..self.width + self.data_width).map(move |i| self.signal(i))
  }

  fn signal(&self, index: usize) -> MaskRow<'_> {
    if index < self.width {
      MaskRow {
        state: self.mask_state.row(index),
        data: self.mask_data.row(index),
      }
    } else {
      let i = index - self.width;
      MaskRow {
        state: self.output_mask_state.row(i),
        data: self.output_mask_data.row(i),
      }
    }
  }

  /// Total number of set mask bits, i.e. two-input XOR gates plus one per signal.
  #[must_use]
  pub fn density(&self) -> usize {
    [
      &self.mask_state,
      &self.mask_data,
      &self.output_mask_state,
      &self.output_mask_data,
    ]
    .into_iter()
    .flat_map(BitMatrix::iter_rows)
    .map(BitVec::count_ones)
    .sum()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Derive the parallel masks for `config`.
///
/// Pure and deterministic: equal configs give bit-identical bundles.
#[must_use]
pub fn compute_masks(config: &Config) -> MaskBundle {
  compute_masks_with(config, Trace::Off)
}

/// [`compute_masks`] with explicit diagnostics.
#[must_use]
pub fn compute_masks_with(config: &Config, trace: Trace) -> MaskBundle {
  let w = config.width();
  let d = config.data_width();
  let taps: alloc::vec::Vec<usize> = config.taps().collect();

  let mut mask_state = BitMatrix::identity(w);
  let mut mask_data = BitMatrix::zeros(w, d);
  // Placeholder history; every row is overwritten after `d` steps.
  let mut output_mask_state = BitMatrix::diagonal(d, w);
  let mut output_mask_data = BitMatrix::zeros(d, d);

  for step in 0..d {
    let data_bit = BitVec::one_hot(d, d - 1 - step);

    // Value leaving the last cell, combined with the incoming data bit.
    let mut state_val = mask_state.row(w - 1).clone();
    let mut data_val = mask_data.row(w - 1).clone();
    data_val ^= &data_bit;

    if config.topology() == Topology::Fibonacci {
      for &j in &taps {
        state_val ^= mask_state.row(j - 1);
        data_val ^= mask_data.row(j - 1);
      }
    }

    output_mask_state.shift_in(state_val.clone());
    output_mask_data.shift_in(data_val.clone());

    // Feed-forward cuts the state path; only raw input enters the register.
    let (state_in, data_in) = if config.feed_forward() {
      (BitVec::zeros(w), data_bit)
    } else {
      (state_val, data_val)
    };

    match config.topology() {
      Topology::Fibonacci => {
        mask_state.shift_in(state_in);
        mask_data.shift_in(data_in);
      }
      Topology::Galois => {
        mask_state.shift_in(state_in.clone());
        mask_data.shift_in(data_in.clone());
        for &j in &taps {
          *mask_state.row_mut(j) ^= &state_in;
          *mask_data.row_mut(j) ^= &data_in;
        }
      }
    }

    if trace.steps() {
      log::trace!(
        target: "lfsr::mask",
        "step {step}: consumed data[{}], output row fan-in state={} data={}",
        d - 1 - step,
        output_mask_state.row(0).count_ones(),
        output_mask_data.row(0).count_ones(),
      );
    }
  }

  let bundle = if config.reverse() {
    MaskBundle {
      width: w,
      data_width: d,
      reverse: true,
      mask_state: mask_state.reversed(),
      mask_data: mask_data.reversed(),
      output_mask_state: output_mask_state.reversed(),
      output_mask_data: output_mask_data.reversed(),
    }
  } else {
    MaskBundle {
      width: w,
      data_width: d,
      reverse: false,
      mask_state,
      mask_data,
      output_mask_state,
      output_mask_data,
    }
  };

  if trace.summary() {
    log::debug!(
      target: "lfsr::mask",
      "derived masks for {config}: {} taps, {} mask bits",
      taps.len(),
      bundle.density(),
    );
  }
  if trace.steps() {
    log::trace!(target: "lfsr::mask", "mask_state:\n{}", bundle.mask_state);
    log::trace!(target: "lfsr::mask", "mask_data:\n{}", bundle.mask_data);
    log::trace!(target: "lfsr::mask", "output_mask_state:\n{}", bundle.output_mask_state);
    log::trace!(target: "lfsr::mask", "output_mask_data:\n{}", bundle.output_mask_data);
  }

  bundle
}
