//! Errors raised by the chaining mode.

use thiserror::Error;

/// Failures of a CBC encryption or decryption call.
///
/// `E` is the error type of the underlying block cipher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CbcError<E> {
    /// The cipher reports a block size PKCS#7 cannot express (0 or above 255).
    #[error("unsupported block size {block_size} (must be 1..=255 bytes)")]
    UnsupportedBlockSize {
        /// Block size reported by the cipher.
        block_size: usize,
    },
    /// The IV was not exactly one block long.
    #[error("invalid IV length (expected {expected} bytes, got {found})")]
    InvalidIvLength {
        /// Block size of the cipher.
        expected: usize,
        /// Length of the supplied IV.
        found: usize,
    },
    /// Input length is not a multiple of the block size.
    #[error("input length {len} is not a multiple of the {block_size}-byte block size")]
    UnalignedInput {
        /// Length of the input.
        len: usize,
        /// Block size of the cipher.
        block_size: usize,
    },
    /// The trailing PKCS#7 padding did not verify.
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,
    /// The block cipher rejected a block.
    #[error("block cipher failed: {0}")]
    Cipher(#[source] E),
}
