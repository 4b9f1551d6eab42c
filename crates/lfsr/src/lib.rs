//! Parallel LFSR and CRC mask derivation over GF(2).
//!
//! A serial linear feedback shift register consumes one data bit per clock.
//! Hardware that processes a `D`-bit bus per clock needs the same register
//! unrolled `D` times into pure XOR logic. This crate derives that logic as
//! four binary matrices (a [`MaskBundle`]) and evaluates them bit-exactly.
//!
//! # Supported registers
//!
//! | Knob | Values |
//! |------|--------|
//! | [`Topology`] | Fibonacci (PRBS, scramblers), Galois (CRC) |
//! | Width `W` | any `>= 1`; the polynomial is arbitrary precision |
//! | Bus width `D` | any `>= 1`, independent of `W` |
//! | Feed-forward | descrambler / self-synchronizing operation |
//! | Reverse | LSB-first (reflected) bit order |
//!
//! Ready-made CRC, PRBS and line-code scrambler definitions live in
//! [`presets`].
//!
//! # Example
//!
//! ```rust
//! use lfsr::{BitVec, Config, Register, compute_masks, reference};
//!
//! // CRC-32 over a 64-bit bus.
//! let cfg = Config::galois(32, 64, 0x04C1_1DB7u32)?.with_reverse(true);
//! let masks = compute_masks(&cfg);
//!
//! let mut crc = Register::new(&masks, BitVec::ones(32))?;
//! crc.absorb(b"12345678")?;
//!
//! let bitwise = reference::crc_reflected(0xEDB8_8320, 32, 0xFFFF_FFFF, b"12345678");
//! assert_eq!(crc.state().to_u64(), Some(bitwise));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Verification
//!
//! [`reference`] is an independent bit-serial model. Property tests and fuzz
//! targets check that every bundle agrees with it.
//!
//! # no_std Support
//!
//! The engine and evaluator need only `alloc`. The `std` feature (default)
//! adds the shared [`cache`].
//!
//! ```toml
//! [dependencies]
//! lfsr = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod bits;
mod config;
mod error;
mod eval;
mod mask;

#[cfg(feature = "std")]
pub mod cache;
pub mod presets;
pub mod reference;

pub use bits::{BitMatrix, BitVec, bits_to_int, int_to_bits};
pub use config::{Config, Polynomial, Topology};
pub use error::{ConfigError, Operand, ShapeMismatchError};
pub use eval::{Evaluation, Register, evaluate, evaluate_bools};
pub use mask::{MaskBundle, MaskRow, Trace, compute_masks, compute_masks_with};
pub use presets::Preset;
