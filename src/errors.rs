//! Error types used throughout the library.

use std::convert::Infallible;

use thiserror::Error as ThisError;

/// A word allocator refused a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("cannot allocate {requested} words (limit {limit})")]
pub struct AllocError {
    pub requested: usize,
    pub limit: usize,
}

/// Every failure a `BigInt` operation can report.
///
/// Truncation of a ToBuf result is not an error; a buffer primitive always produces the
/// two's complement truncation of the exact result.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// The text holds no digits.
    #[error("empty number")]
    Empty,

    /// The text holds a character that is not a digit of the expected base.
    #[error("invalid digit {ch:?} at offset {offset}")]
    InvalidDigit { ch: char, offset: usize },

    /// Hex text must start with "0x".
    #[error("hex number must start with '0x'")]
    MissingHexPrefix,

    /// The divisor is zero. Neither quotient nor remainder is defined.
    #[error("division by zero")]
    DivisionByZero,

    /// The allocator refused the words an operation needs.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
