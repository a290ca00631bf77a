//! Round count and the TEA round function.

use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use crate::error::{Result, TeaError};

/// Key schedule constant, `floor(2^32 / phi)`.
pub const DELTA: u32 = 0x9E37_79B9;

/// Number of rounds applied per block.
///
/// Each round here updates both halves, so the default of 32 corresponds to
/// 64 Feistel rounds in the original paper's terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rounds(u32);

impl Rounds {
    /// Reference round count.
    pub const DEFAULT: Rounds = Rounds(32);

    /// Wraps a round count. Zero is accepted and makes the cipher the identity.
    pub const fn new(rounds: u32) -> Self {
        Self(rounds)
    }

    /// Returns the raw count.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Value of the running sum after the last encryption round, which is
    /// where decryption starts.
    #[inline]
    pub const fn initial_sum(self) -> u32 {
        DELTA.wrapping_mul(self.0)
    }
}

impl Default for Rounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Rounds {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Rounds {
    type Error = TeaError;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| TeaError::InvalidRoundCount(value.to_string()))
    }
}

impl FromStr for Rounds {
    type Err = TeaError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| TeaError::InvalidRoundCount(s.to_owned()))
    }
}

impl fmt::Display for Rounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mixes one half into the other's update term:
/// `((v << 4) + ka) ^ (v + sum) ^ ((v >> 5) + kb)`, all mod 2^32.
#[inline(always)]
pub(crate) fn mix(v: u32, sum: u32, ka: u32, kb: u32) -> u32 {
    (v << 4).wrapping_add(ka) ^ v.wrapping_add(sum) ^ (v >> 5).wrapping_add(kb)
}
