//! Error types for configuration and evaluation.
//!
//! Both errors are local and non-retryable: they report a caller defect
//! (a bad parameter or a mis-sized vector), never a transient condition.

use core::fmt;

/// A [`Config`](crate::Config) could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigError {
  /// Register width was zero.
  ZeroWidth,
  /// Data bus width was zero.
  ZeroDataWidth,
  /// Topology name was neither `fibonacci` nor `galois`.
  UnknownTopology,
}

impl ConfigError {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::ZeroWidth => "register width must be at least 1",
      Self::ZeroDataWidth => "data width must be at least 1",
      Self::UnknownTopology => "unknown topology (expected \"fibonacci\" or \"galois\")",
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl core::error::Error for ConfigError {}

/// Which evaluator input had the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
  State,
  Data,
}

impl Operand {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::State => "state",
      Self::Data => "data",
    }
  }
}

/// A state or data vector did not match the width a
/// [`MaskBundle`](crate::MaskBundle) was derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMismatchError {
  pub operand: Operand,
  pub expected: usize,
  pub actual: usize,
}

impl ShapeMismatchError {
  #[inline]
  #[must_use]
  pub const fn new(operand: Operand, expected: usize, actual: usize) -> Self {
    Self {
      operand,
      expected,
      actual,
    }
  }

  /// `Ok(())` if `actual == expected`.
  #[inline]
  pub const fn check(operand: Operand, expected: usize, actual: usize) -> Result<(), Self> {
    if expected == actual {
      Ok(())
    } else {
      Err(Self::new(operand, expected, actual))
    }
  }
}

impl fmt::Display for ShapeMismatchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} vector has {} bits, expected {}",
      self.operand.as_str(),
      self.actual,
      self.expected
    )
  }
}

impl core::error::Error for ShapeMismatchError {}
