//! Command-line interface for `tea-core` and `tea-cbc`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tea_cbc::{Cbc, Padding};
use tea_core::{expand_key, Key, Rounds, Tea, BLOCK_SIZE, KEY_SIZE};

/// TEA block cipher CLI.
#[derive(Parser)]
#[command(name = "tea", version, author, about = "TEA block cipher CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a single 8-byte block.
    EncBlock {
        #[command(flatten)]
        cipher: CipherArgs,
        /// Plaintext block as 16 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt a single 8-byte block.
    DecBlock {
        #[command(flatten)]
        cipher: CipherArgs,
        /// Ciphertext block as 16 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Encrypt a file in CBC mode; the output starts with the IV.
    Enc {
        #[command(flatten)]
        cipher: CipherArgs,
        /// Input plaintext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path for IV followed by ciphertext.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// IV as 16 hex characters (random when omitted).
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// Optional RNG seed for a reproducible IV.
        #[arg(long, conflicts_with = "iv_hex")]
        seed: Option<u64>,
        /// Disable PKCS#7 padding (input must be a multiple of 8 bytes).
        #[arg(long, default_value_t = false)]
        no_pad: bool,
    },
    /// Decrypt a file produced by `enc`.
    Dec {
        #[command(flatten)]
        cipher: CipherArgs,
        /// Input path (IV followed by ciphertext).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// The file was encrypted with `--no-pad`.
        #[arg(long, default_value_t = false)]
        no_pad: bool,
    },
    /// Verify the known-answer vectors and random round trips.
    Check {
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and message, CBC encrypt, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct CipherArgs {
    #[command(flatten)]
    key: KeyArgs,
    /// Number of rounds.
    #[arg(long, default_value_t = Rounds::DEFAULT, value_parser = Rounds::from_str)]
    rounds: Rounds,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeyArgs {
    /// Key as 16 raw characters.
    #[arg(long, value_name = "TEXT")]
    key: Option<String>,
    /// Key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
    /// Key as four comma-separated integer words.
    #[arg(long, value_name = "K0,K1,K2,K3", value_parser = Key::from_str, allow_hyphen_values = true)]
    key_words: Option<Key>,
}

impl CipherArgs {
    fn build(&self) -> Result<Tea> {
        let key = self.key.resolve()?;
        debug!("cipher key from {}, {} rounds", self.key.form(), self.rounds);
        Ok(Tea::with_rounds(key, self.rounds))
    }
}

impl KeyArgs {
    fn form(&self) -> &'static str {
        if self.key.is_some() {
            "--key"
        } else if self.key_hex.is_some() {
            "--key-hex"
        } else {
            "--key-words"
        }
    }

    fn resolve(&self) -> Result<Key> {
        match (&self.key, &self.key_hex, &self.key_words) {
            (Some(text), _, _) => expand_key(text.as_bytes()).context("parse --key"),
            (_, Some(hex_str), _) => parse_key_hex(hex_str),
            (_, _, Some(key)) => Ok(*key),
            _ => bail!("one of --key, --key-hex or --key-words is required"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::EncBlock { cipher, block_hex } => cmd_block(&cipher, &block_hex, true),
        Commands::DecBlock { cipher, block_hex } => cmd_block(&cipher, &block_hex, false),
        Commands::Enc {
            cipher,
            input,
            output,
            iv_hex,
            seed,
            no_pad,
        } => cmd_enc(&cipher, &input, &output, iv_hex.as_deref(), seed, padding(no_pad)),
        Commands::Dec {
            cipher,
            input,
            output,
            no_pad,
        } => cmd_dec(&cipher, &input, &output, padding(no_pad)),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_block(args: &CipherArgs, block_hex: &str, encrypt: bool) -> Result<()> {
    let tea = args.build()?;
    let block = hex::decode(block_hex.trim()).context("decode block hex")?;
    let out = if encrypt {
        tea.encrypt(&block)
    } else {
        tea.decrypt(&block)
    }
    .context("transform block")?;
    println!("{}", hex::encode(out));
    Ok(())
}

fn cmd_enc(
    args: &CipherArgs,
    input_path: &PathBuf,
    output_path: &PathBuf,
    iv_hex: Option<&str>,
    seed: Option<u64>,
    padding: Padding,
) -> Result<()> {
    let cbc = Cbc::new(args.build()?);
    let iv = match iv_hex {
        Some(hex_str) => parse_iv_hex(hex_str)?,
        None => seeded_rng(seed).gen(),
    };
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = cbc
        .encrypt(&iv, &data, padding)
        .context("encrypt input")?;

    let mut out = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    fs::write(output_path, &out).with_context(|| format!("write {}", output_path.display()))?;
    info!(
        "encrypted {} bytes from {} into {}",
        data.len(),
        input_path.display(),
        output_path.display()
    );
    Ok(())
}

fn cmd_dec(
    args: &CipherArgs,
    input_path: &PathBuf,
    output_path: &PathBuf,
    padding: Padding,
) -> Result<()> {
    let cbc = Cbc::new(args.build()?);
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() < BLOCK_SIZE {
        bail!("input is shorter than the {BLOCK_SIZE}-byte IV");
    }
    let (iv, ciphertext) = data.split_at(BLOCK_SIZE);
    let plaintext = cbc
        .decrypt(iv, ciphertext, padding)
        .context("decrypt input")?;
    fs::write(output_path, &plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(
        "decrypted {} bytes from {} into {}",
        plaintext.len(),
        input_path.display(),
        output_path.display()
    );
    Ok(())
}

/// Known-answer vectors: (key, rounds, plaintext, ciphertext).
const VECTORS: [(&[u8; KEY_SIZE], u32, [u8; BLOCK_SIZE], [u8; BLOCK_SIZE]); 4] = [
    (
        &[0u8; KEY_SIZE],
        32,
        [0u8; BLOCK_SIZE],
        [0x41, 0xea, 0x3a, 0x0a, 0x94, 0xba, 0xa9, 0x40],
    ),
    (
        b"qwertyuiopasdfgh",
        32,
        *b"The quic",
        [0xbf, 0x85, 0xa2, 0x9b, 0x92, 0xb4, 0x79, 0xc3],
    ),
    (
        b"qwertyuiopasdfgh",
        1,
        *b"The quic",
        [0x53, 0xcc, 0x9d, 0x2a, 0xaa, 0xb0, 0x58, 0x04],
    ),
    (
        b"qwertyuiopasdfgh",
        64,
        *b"The quic",
        [0x7e, 0x7e, 0x37, 0xd7, 0x1b, 0x52, 0xaa, 0xf9],
    ),
];

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    for (key, rounds, plain, cipher) in VECTORS.iter() {
        let tea = Tea::with_rounds(Key::from(**key), Rounds::new(*rounds));
        if tea.encrypt(plain)? != *cipher || tea.decrypt(cipher)? != *plain {
            bail!("known-answer mismatch at {rounds} rounds");
        }
    }
    info!("{} known-answer vectors passed", VECTORS.len());

    let mut rng = seeded_rng(seed);
    for _ in 0..samples {
        let tea = Tea::with_rounds(Key(rng.gen()), Rounds::new(rng.gen_range(0..=64)));
        let iv: [u8; BLOCK_SIZE] = rng.gen();
        let mut msg = vec![0u8; rng.gen_range(0..256)];
        rng.fill_bytes(&mut msg);

        let cbc = Cbc::new(tea);
        let ct = cbc.encrypt(&iv, &msg, Padding::Pkcs7)?;
        if cbc.decrypt(&iv, &ct, Padding::Pkcs7)? != msg {
            bail!("round trip failed at {} rounds", tea.rounds());
        }
    }
    info!("{samples} random round trips passed");
    println!("ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key_bytes: [u8; KEY_SIZE] = rng.gen();
    let iv: [u8; BLOCK_SIZE] = rng.gen();
    let cbc = Cbc::new(Tea::new(Key::from(key_bytes)));

    let plaintext = b"The quick brown fox jumps over the lazy dog.";
    let ciphertext = cbc.encrypt(&iv, plaintext, Padding::Pkcs7)?;
    let decrypted = cbc.decrypt(&iv, &ciphertext, Padding::Pkcs7)?;

    println!("demo key: {}", hex::encode(key_bytes));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(plaintext));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn padding(no_pad: bool) -> Padding {
    if no_pad {
        Padding::None
    } else {
        Padding::default()
    }
}

fn parse_key_hex(hex_str: &str) -> Result<Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.len() != KEY_SIZE {
        bail!("TEA key must be 16 bytes (32 hex characters)");
    }
    Ok(expand_key(&bytes)?)
}

fn parse_iv_hex(hex_str: &str) -> Result<[u8; BLOCK_SIZE]> {
    let bytes = hex::decode(hex_str.trim()).context("decode IV hex")?;
    let iv: [u8; BLOCK_SIZE] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("IV must be 8 bytes (16 hex characters)"))?;
    Ok(iv)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
