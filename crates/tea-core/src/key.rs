//! Key types and key expansion for TEA.

use core::convert::{TryFrom, TryInto};
use core::str::FromStr;

use crate::error::{Result, TeaError};

/// Key size in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of 32-bit subkey words.
const KEY_WORDS: usize = 4;

/// Expanded TEA key: four subkey words `k0..k3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key(pub [u32; 4]);

impl Key {
    /// Builds a key from the array form. Each element keeps only its low
    /// 32 bits, so `-1` becomes `0xffff_ffff`.
    pub fn from_words(words: &[i64]) -> Result<Self> {
        if words.len() != KEY_WORDS {
            return Err(TeaError::InvalidKeyLength {
                expected: KEY_WORDS,
                found: words.len(),
                unit: "words",
            });
        }
        let mut k = [0u32; KEY_WORDS];
        for (dst, src) in k.iter_mut().zip(words) {
            *dst = *src as u32;
        }
        Ok(Self(k))
    }

    /// Resolves either key form into the canonical four words.
    pub fn resolve(material: KeyMaterial<'_>) -> Result<Self> {
        match material {
            KeyMaterial::Bytes(bytes) => expand_key(bytes),
            KeyMaterial::Words(words) => Self::from_words(words),
        }
    }

    /// Returns the subkey words.
    #[inline]
    pub fn words(&self) -> &[u32; 4] {
        &self.0
    }
}

/// Splits 16 bytes into four big-endian subkey words.
pub fn expand_key(bytes: &[u8]) -> Result<Key> {
    let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| TeaError::InvalidKeyLength {
        expected: KEY_SIZE,
        found: bytes.len(),
        unit: "bytes",
    })?;
    Ok(Key::from(bytes))
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        let mut k = [0u32; KEY_WORDS];
        for (word, chunk) in k.iter_mut().zip(value.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(k)
    }
}

impl From<[u32; 4]> for Key {
    fn from(value: [u32; 4]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = TeaError;

    fn try_from(value: &[u8]) -> Result<Self> {
        expand_key(value)
    }
}

/// Parses the textual array form `"k0,k1,k2,k3"`. Words may be decimal,
/// `0x`-prefixed hex, or negative.
impl FromStr for Key {
    type Err = TeaError;

    fn from_str(s: &str) -> Result<Self> {
        let words = s
            .split(',')
            .map(|w| parse_word(w.trim()))
            .collect::<Result<Vec<i64>>>()?;
        Self::from_words(&words)
    }
}

fn parse_word(word: &str) -> Result<i64> {
    let parsed = match word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => word.parse::<i64>(),
    };
    parsed.map_err(|_| TeaError::InvalidKeyFormat(word.to_owned()))
}

/// Key input accepted at cipher construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMaterial<'a> {
    /// Raw key bytes; must be exactly 16 long.
    Bytes(&'a [u8]),
    /// Four integer words; must have exactly 4 elements.
    Words(&'a [i64]),
}

impl<'a> From<&'a [u8]> for KeyMaterial<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a str> for KeyMaterial<'a> {
    fn from(value: &'a str) -> Self {
        Self::Bytes(value.as_bytes())
    }
}

impl<'a> From<&'a [i64]> for KeyMaterial<'a> {
    fn from(value: &'a [i64]) -> Self {
        Self::Words(value)
    }
}
