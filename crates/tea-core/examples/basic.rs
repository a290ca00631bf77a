//! Encrypts and decrypts one block, checking it against the pinned vector.

use tea_core::{Rounds, Tea};

fn main() -> Result<(), tea_core::TeaError> {
    let tea = Tea::from_material("qwertyuiopasdfgh".into(), Rounds::DEFAULT)?;

    let ciphertext = tea.encrypt(b"The quic")?;
    assert_eq!(ciphertext, [0xbf, 0x85, 0xa2, 0x9b, 0x92, 0xb4, 0x79, 0xc3]);

    let plaintext = tea.decrypt(&ciphertext)?;
    assert_eq!(&plaintext, b"The quic");

    println!("example succeeded; ciphertext matches the TEA reference");
    Ok(())
}
