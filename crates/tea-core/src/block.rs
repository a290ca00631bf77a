//! Block representation and byte conversion.

use core::convert::TryInto;

use crate::error::{Result, TeaError};

/// TEA block: two 32-bit halves `(v0, v1)`.
pub type Block = [u32; 2];

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Splits an 8-byte buffer into two big-endian words.
pub fn bytes_to_block(buf: &[u8]) -> Result<Block> {
    let bytes: &[u8; BLOCK_SIZE] = buf
        .try_into()
        .map_err(|_| TeaError::InvalidBlockLength { found: buf.len() })?;
    let (hi, lo) = bytes.split_at(4);
    Ok([
        u32::from_be_bytes([hi[0], hi[1], hi[2], hi[3]]),
        u32::from_be_bytes([lo[0], lo[1], lo[2], lo[3]]),
    ])
}

/// Writes both words of `block` big-endian into 8 bytes.
pub fn block_to_bytes(block: &Block) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    out[..4].copy_from_slice(&block[0].to_be_bytes());
    out[4..].copy_from_slice(&block[1].to_be_bytes());
    out
}
