//! Padding schemes applied to the final block.

use log::trace;

/// How the last partial block is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Padding {
    /// No padding; input must already be a whole number of blocks.
    None,
    /// PKCS#7: append `n` bytes of value `n`, `1 <= n <= block_size`.
    #[default]
    Pkcs7,
}

impl Padding {
    /// Appends padding to `data` in place.
    pub(crate) fn pad(self, data: &mut Vec<u8>, block_size: usize) {
        if let Padding::Pkcs7 = self {
            let pad = block_size - data.len() % block_size;
            trace!("appending {pad} PKCS#7 padding bytes");
            data.resize(data.len() + pad, pad as u8);
        }
    }

    /// Strips padding from `data`. Returns `false` if the trailer is malformed.
    pub(crate) fn unpad(self, data: &mut Vec<u8>, block_size: usize) -> bool {
        match self {
            Padding::None => true,
            Padding::Pkcs7 => {
                let Some(&last) = data.last() else {
                    return false;
                };
                let pad = usize::from(last);
                if pad == 0 || pad > block_size || pad > data.len() {
                    return false;
                }
                let body = data.len() - pad;
                if data[body..].iter().any(|&b| b != last) {
                    return false;
                }
                data.truncate(body);
                true
            }
        }
    }
}
