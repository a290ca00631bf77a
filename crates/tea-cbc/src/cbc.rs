//! Cipher-block chaining over any [`BlockCipher`].

use log::debug;
use tea_core::{Tea, TeaError};

use crate::error::CbcError;
use crate::padding::Padding;

/// The per-block contract a chaining mode needs from a cipher.
pub trait BlockCipher {
    /// Error returned when the cipher rejects a block.
    type Error;

    /// Block size in bytes, in `1..=255`.
    fn block_size(&self) -> usize;

    /// Encrypts exactly one block in place.
    fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), Self::Error>;

    /// Decrypts exactly one block in place.
    fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), Self::Error>;
}

impl BlockCipher for Tea {
    type Error = TeaError;

    fn block_size(&self) -> usize {
        Tea::block_size()
    }

    fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), TeaError> {
        Tea::encrypt_in_place(self, block)
    }

    fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), TeaError> {
        Tea::decrypt_in_place(self, block)
    }
}

#[inline]
fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// CBC mode wrapping a block cipher.
///
/// # Example
/// ```
/// use tea_cbc::{Cbc, Padding};
/// use tea_core::{Key, Tea};
///
/// let cbc = Cbc::new(Tea::new(Key::from(*b"qwertyuiopasdfgh")));
/// let iv = [5u8; 8];
/// let ct = cbc.encrypt(&iv, b"Hello, world!", Padding::Pkcs7).unwrap();
/// assert_eq!(ct.len(), 16);
/// assert_eq!(cbc.decrypt(&iv, &ct, Padding::Pkcs7).unwrap(), b"Hello, world!");
/// ```
#[derive(Clone, Debug)]
pub struct Cbc<C> {
    cipher: C,
}

impl<C: BlockCipher> Cbc<C> {
    /// Wraps `cipher`.
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Returns the wrapped cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Encrypts `plaintext` chained from `iv`.
    ///
    /// With [`Padding::None`] the plaintext must be block aligned and the
    /// ciphertext has the same length; with [`Padding::Pkcs7`] the ciphertext
    /// is rounded up to the next whole block.
    pub fn encrypt(
        &self,
        iv: &[u8],
        plaintext: &[u8],
        padding: Padding,
    ) -> Result<Vec<u8>, CbcError<C::Error>> {
        let bs = self.check_iv(iv)?;
        if padding == Padding::None && plaintext.len() % bs != 0 {
            return Err(CbcError::UnalignedInput {
                len: plaintext.len(),
                block_size: bs,
            });
        }

        let mut data = Vec::with_capacity(plaintext.len() + bs);
        data.extend_from_slice(plaintext);
        padding.pad(&mut data, bs);

        let mut prev = iv;
        for chunk in data.chunks_exact_mut(bs) {
            xor_in_place(chunk, prev);
            self.cipher
                .encrypt_in_place(chunk)
                .map_err(CbcError::Cipher)?;
            prev = chunk;
        }
        debug!(
            "cbc encrypted {} plaintext bytes into {} bytes",
            plaintext.len(),
            data.len()
        );
        Ok(data)
    }

    /// Decrypts `ciphertext` chained from `iv` and strips padding.
    pub fn decrypt(
        &self,
        iv: &[u8],
        ciphertext: &[u8],
        padding: Padding,
    ) -> Result<Vec<u8>, CbcError<C::Error>> {
        let bs = self.check_iv(iv)?;
        if ciphertext.len() % bs != 0 {
            return Err(CbcError::UnalignedInput {
                len: ciphertext.len(),
                block_size: bs,
            });
        }

        let mut data = ciphertext.to_vec();
        let prevs = core::iter::once(iv).chain(ciphertext.chunks_exact(bs));
        for (chunk, prev) in data.chunks_exact_mut(bs).zip(prevs) {
            self.cipher
                .decrypt_in_place(chunk)
                .map_err(CbcError::Cipher)?;
            xor_in_place(chunk, prev);
        }

        if !padding.unpad(&mut data, bs) {
            return Err(CbcError::InvalidPadding);
        }
        debug!(
            "cbc decrypted {} ciphertext bytes into {} bytes",
            ciphertext.len(),
            data.len()
        );
        Ok(data)
    }

    fn check_iv(&self, iv: &[u8]) -> Result<usize, CbcError<C::Error>> {
        let bs = self.cipher.block_size();
        if bs == 0 || bs > usize::from(u8::MAX) {
            return Err(CbcError::UnsupportedBlockSize { block_size: bs });
        }
        if iv.len() != bs {
            return Err(CbcError::InvalidIvLength {
                expected: bs,
                found: iv.len(),
            });
        }
        Ok(bs)
    }
}
