//! CBC chaining mode for 64-bit block ciphers.
//!
//! The mode owns everything a bare block cipher does not: the IV, the
//! chaining of each ciphertext block into the next plaintext block, and
//! PKCS#7 padding. The cipher is called exactly once per block, in order.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cbc;
mod error;
mod padding;

pub use crate::cbc::{BlockCipher, Cbc};
pub use crate::error::CbcError;
pub use crate::padding::Padding;
