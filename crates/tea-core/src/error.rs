//! Error type shared by key, round and block validation.

use thiserror::Error;

/// Errors raised while constructing a cipher or converting a block.
///
/// All of these are detected before any transformation starts, so a failed
/// call never leaves a partially written buffer behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeaError {
    /// Key bytes were not 16 long, or the word form did not have 4 elements.
    #[error("invalid key length (expected {expected} {unit}, got {found})")]
    InvalidKeyLength {
        /// Required number of elements.
        expected: usize,
        /// Number of elements supplied.
        found: usize,
        /// `"bytes"` or `"words"`.
        unit: &'static str,
    },
    /// A word of a textual key was not an integer.
    #[error("invalid key word `{0}`: not an integer")]
    InvalidKeyFormat(String),
    /// The round count was negative or not an integer.
    #[error("invalid round count `{0}`: must be a non-negative integer")]
    InvalidRoundCount(String),
    /// A plaintext or ciphertext buffer was not exactly one block.
    #[error("invalid block length (expected 8 bytes, got {found})")]
    InvalidBlockLength {
        /// Length of the rejected buffer.
        found: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, TeaError>;
