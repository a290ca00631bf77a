//! TEA block encryption/decryption and the cipher handle.

use crate::block::{block_to_bytes, bytes_to_block, Block, BLOCK_SIZE};
use crate::error::Result;
use crate::key::{Key, KeyMaterial, KEY_SIZE};
use crate::round::{mix, Rounds, DELTA};

/// Encrypts a single block with the given key and round count.
pub fn encrypt_block(block: &Block, key: &Key, rounds: Rounds) -> Block {
    let [k0, k1, k2, k3] = key.0;
    let [mut v0, mut v1] = *block;
    let mut sum = 0u32;
    for _ in 0..rounds.get() {
        sum = sum.wrapping_add(DELTA);
        v0 = v0.wrapping_add(mix(v1, sum, k0, k1));
        v1 = v1.wrapping_add(mix(v0, sum, k2, k3));
    }
    [v0, v1]
}

/// Decrypts a single block with the given key and round count.
pub fn decrypt_block(block: &Block, key: &Key, rounds: Rounds) -> Block {
    let [k0, k1, k2, k3] = key.0;
    let [mut v0, mut v1] = *block;
    let mut sum = rounds.initial_sum();
    for _ in 0..rounds.get() {
        v1 = v1.wrapping_sub(mix(v0, sum, k2, k3));
        v0 = v0.wrapping_sub(mix(v1, sum, k0, k1));
        sum = sum.wrapping_sub(DELTA);
    }
    [v0, v1]
}

/// A TEA cipher bound to one key and round count.
///
/// The handle is immutable after construction and holds no per-call state,
/// so it can be shared freely between threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tea {
    key: Key,
    rounds: Rounds,
}

impl Tea {
    /// Creates a cipher with the default 32 rounds.
    pub fn new(key: Key) -> Self {
        Self::with_rounds(key, Rounds::DEFAULT)
    }

    /// Creates a cipher with an explicit round count.
    pub fn with_rounds(key: Key, rounds: Rounds) -> Self {
        Self { key, rounds }
    }

    /// Resolves raw key material and creates a cipher.
    ///
    /// # Example
    /// ```
    /// use tea_core::{Rounds, Tea};
    ///
    /// let tea = Tea::from_material("qwertyuiopasdfgh".into(), Rounds::DEFAULT).unwrap();
    /// let ct = tea.encrypt(b"The quic").unwrap();
    /// assert_eq!(&tea.decrypt(&ct).unwrap(), b"The quic");
    /// ```
    pub fn from_material(material: KeyMaterial<'_>, rounds: Rounds) -> Result<Self> {
        Ok(Self::with_rounds(Key::resolve(material)?, rounds))
    }

    /// Block size in bytes.
    pub const fn block_size() -> usize {
        BLOCK_SIZE
    }

    /// Key size in bytes.
    pub const fn key_size() -> usize {
        KEY_SIZE
    }

    /// Expanded key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Configured round count.
    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// Encrypts one word-pair block.
    #[inline]
    pub fn encrypt_block(&self, block: Block) -> Block {
        encrypt_block(&block, &self.key, self.rounds)
    }

    /// Decrypts one word-pair block.
    #[inline]
    pub fn decrypt_block(&self, block: Block) -> Block {
        decrypt_block(&block, &self.key, self.rounds)
    }

    /// Encrypts an 8-byte buffer.
    pub fn encrypt(&self, buf: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        let block = bytes_to_block(buf)?;
        Ok(block_to_bytes(&self.encrypt_block(block)))
    }

    /// Decrypts an 8-byte buffer.
    pub fn decrypt(&self, buf: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        let block = bytes_to_block(buf)?;
        Ok(block_to_bytes(&self.decrypt_block(block)))
    }

    /// Encrypts an 8-byte buffer in place. The buffer is untouched on error.
    pub fn encrypt_in_place(&self, buf: &mut [u8]) -> Result<()> {
        let out = self.encrypt(buf)?;
        buf.copy_from_slice(&out);
        Ok(())
    }

    /// Decrypts an 8-byte buffer in place. The buffer is untouched on error.
    pub fn decrypt_in_place(&self, buf: &mut [u8]) -> Result<()> {
        let out = self.decrypt(buf)?;
        buf.copy_from_slice(&out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TeaError;
    use crate::key::expand_key;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const KAT_KEY: &[u8; 16] = b"qwertyuiopasdfgh";
    const KAT_PLAIN: &[u8] = b"The quick brown fox jumps over the lazy dog.";

    fn kat_cipher(rounds: u32) -> Tea {
        Tea::with_rounds(Key::from(*KAT_KEY), Rounds::new(rounds))
    }

    #[test]
    fn encrypt_matches_pinned_vector() {
        let ct = kat_cipher(32).encrypt(&KAT_PLAIN[..8]).expect("one block");
        assert_eq!(ct, [0xbf, 0x85, 0xa2, 0x9b, 0x92, 0xb4, 0x79, 0xc3]);
    }

    #[test]
    fn decrypt_matches_pinned_vector() {
        let pt = kat_cipher(32)
            .decrypt(&[0xbf, 0x85, 0xa2, 0x9b, 0x92, 0xb4, 0x79, 0xc3])
            .expect("one block");
        assert_eq!(&pt, &KAT_PLAIN[..8]);
    }

    #[test]
    fn zero_key_reference_vector() {
        let ct = encrypt_block(&[0, 0], &Key([0; 4]), Rounds::DEFAULT);
        assert_eq!(ct, [0x41ea_3a0a, 0x94ba_a940]);
    }

    #[test]
    fn other_round_counts_are_pinned() {
        let one = kat_cipher(1).encrypt(&KAT_PLAIN[..8]).expect("one block");
        assert_eq!(one, [0x53, 0xcc, 0x9d, 0x2a, 0xaa, 0xb0, 0x58, 0x04]);
        let sixty_four = kat_cipher(64).encrypt(&KAT_PLAIN[..8]).expect("one block");
        assert_eq!(sixty_four, [0x7e, 0x7e, 0x37, 0xd7, 0x1b, 0x52, 0xaa, 0xf9]);
    }

    #[test]
    fn zero_rounds_is_identity() {
        let tea = kat_cipher(0);
        let block = *b"\x00\x01\xfe\xff9abc";
        assert_eq!(tea.encrypt(&block).expect("one block"), block);
        assert_eq!(tea.decrypt(&block).expect("one block"), block);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for rounds in [0u32, 1, 32, 64] {
            for _ in 0..100 {
                let mut key_bytes = [0u8; 16];
                let mut block = [0u8; 8];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let tea = Tea::with_rounds(Key::from(key_bytes), Rounds::new(rounds));
                let ct = tea.encrypt(&block).expect("one block");
                assert_eq!(tea.decrypt(&ct).expect("one block"), block);
                let pt = tea.decrypt(&block).expect("one block");
                assert_eq!(tea.encrypt(&pt).expect("one block"), block);
            }
        }
    }

    #[test]
    fn round_trip_holds_for_odd_round_counts() {
        let tea = kat_cipher(17);
        let block = [0xdead_beef, 0x0123_4567];
        assert_eq!(tea.decrypt_block(tea.encrypt_block(block)), block);
    }

    #[test]
    fn encryption_is_deterministic() {
        let a = kat_cipher(32);
        let b = Tea::from_material(KeyMaterial::Bytes(KAT_KEY), Rounds::DEFAULT)
            .expect("16 bytes");
        let block = &KAT_PLAIN[8..16];
        assert_eq!(a.encrypt(block), b.encrypt(block));
        assert_eq!(a.encrypt(block), a.encrypt(block));
    }

    #[test]
    fn block_length_is_enforced() {
        let tea = kat_cipher(32);
        for len in [0usize, 7, 9, 16] {
            let mut buf = vec![0x5au8; len];
            let err = TeaError::InvalidBlockLength { found: len };
            assert_eq!(tea.encrypt(&buf), Err(err.clone()));
            assert_eq!(tea.decrypt(&buf), Err(err.clone()));
            assert_eq!(tea.encrypt_in_place(&mut buf), Err(err));
            assert!(buf.iter().all(|&b| b == 0x5a));
        }
    }

    #[test]
    fn in_place_matches_copying_api() {
        let tea = kat_cipher(32);
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&KAT_PLAIN[..8]);
        tea.encrypt_in_place(&mut buf).expect("one block");
        assert_eq!(buf, [0xbf, 0x85, 0xa2, 0x9b, 0x92, 0xb4, 0x79, 0xc3]);
        tea.decrypt_in_place(&mut buf).expect("one block");
        assert_eq!(&buf, &KAT_PLAIN[..8]);
    }

    #[test]
    fn construction_rejects_bad_keys() {
        let short = Tea::from_material("too short".into(), Rounds::DEFAULT);
        assert!(matches!(
            short,
            Err(TeaError::InvalidKeyLength { found: 9, .. })
        ));
        let words: [i64; 3] = [1, 2, 3];
        let few = Tea::from_material(KeyMaterial::Words(&words), Rounds::DEFAULT);
        assert!(matches!(few, Err(TeaError::InvalidKeyLength { found: 3, .. })));
        assert_eq!(expand_key(KAT_KEY).map(Tea::new), Ok(kat_cipher(32)));
    }

    #[test]
    fn single_bit_flip_avalanches() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let tea = Tea::new(Key(rng.gen()));
        let trials = 2000;
        let mut flipped = 0u32;
        for _ in 0..trials {
            let block: Block = rng.gen();
            let bit = rng.gen_range(0..64);
            let mut other = block;
            other[bit / 32] ^= 1 << (bit % 32);
            let a = tea.encrypt_block(block);
            let b = tea.encrypt_block(other);
            flipped += (a[0] ^ b[0]).count_ones() + (a[1] ^ b[1]).count_ones();
        }
        let mean = f64::from(flipped) / f64::from(trials);
        assert!((28.0..36.0).contains(&mean), "mean flipped bits {mean}");
    }

    #[test]
    fn sizes_are_exposed() {
        assert_eq!(Tea::block_size(), 8);
        assert_eq!(Tea::key_size(), 16);
    }

    #[test]
    fn shared_across_threads() {
        let tea = kat_cipher(32);
        let handles: Vec<_> = (0u32..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let block = [i, i.wrapping_mul(0x0101_0101)];
                    tea.decrypt_block(tea.encrypt_block(block)) == block
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread"));
        }
    }
}
