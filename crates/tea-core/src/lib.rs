//! TEA (Tiny Encryption Algorithm) block cipher.
//!
//! This crate follows the Wheeler–Needham reference routine and provides:
//! - Key expansion from 16 raw bytes (or four integer words) into subkeys.
//! - Single-block encryption and decryption with a configurable round count.
//! - Big-endian conversion between 8-byte buffers and word pairs.
//!
//! Chaining modes, padding and IV handling live outside this crate; callers
//! size their buffers with [`BLOCK_SIZE`] and [`KEY_SIZE`].
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; TEA itself has known related-key weaknesses and should not
//! protect anything that matters.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;

pub use crate::block::{block_to_bytes, bytes_to_block, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, Tea};
pub use crate::error::{Result, TeaError};
pub use crate::key::{expand_key, Key, KeyMaterial, KEY_SIZE};
pub use crate::round::{Rounds, DELTA};
