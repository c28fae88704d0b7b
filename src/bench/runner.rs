// Benchmark Runner
// Generates a key per size, then times raw and padded encryption plus both decryption paths

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;

use crate::config::RsaConfig;
use crate::rsa::bigint::{from_bytes, to_bytes};
use crate::rsa::RsaProvider;

pub const DEFAULT_TEXT: &str = "RSA (Rivest–Shamir–Adleman) is a public-key cryptosystem that is widely used for secure data transmission. It is also one of the oldest.";

pub const TABLE_HEADER: &str = "Type | KeyGen time (ms.) | Encryption time (ms.) | Decryption time (optimized) (ms.) | Decryption time (direct) (ms.)\n--- | --- | --- | --- | ---";

#[derive(Parser, Debug, Clone)]
#[command(name = "crypto_rsa", version, about = "Time RSA key generation, encryption and decryption")]
pub struct BenchArgs {
    /// Smallest key size in bits
    #[arg(long, default_value_t = 512)]
    pub from: usize,

    /// Largest key size in bits
    #[arg(long, default_value_t = 1024)]
    pub to: usize,

    /// Key size increment in bits
    #[arg(long, default_value_t = 128)]
    pub step: usize,

    /// Plaintext, truncated to what each key size can carry
    #[arg(long, default_value = DEFAULT_TEXT)]
    pub text: String,

    /// JSON file with an RSA configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One table row: a mode and its timings
#[derive(Clone, Debug)]
pub struct BenchRow {
    pub label: &'static str,
    pub input_len: usize,
    pub keygen: Option<Duration>,
    pub encrypt: Duration,
    pub decrypt_crt: Duration,
    pub decrypt_direct: Duration,
    pub verified: bool,
}

impl fmt::Display for BenchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.label)?;
        match self.keygen {
            Some(t) => write!(f, "| {} ", t.as_millis())?,
            None => write!(f, "| = ")?,
        }
        write!(
            f,
            "| {} | {} | {}",
            self.encrypt.as_millis(),
            self.decrypt_crt.as_millis(),
            self.decrypt_direct.as_millis()
        )
    }
}

/// Read a configuration file, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RsaConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config `{}`", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("invalid config `{}`", path.display()))
        }
        None => Ok(RsaConfig::default()),
    }
}

/// Run the whole table and print it to stdout.
pub fn run(args: &BenchArgs) -> anyhow::Result<()> {
    if args.step == 0 {
        bail!("step must be greater than zero");
    }
    let config = load_config(args.config.as_deref())?;

    for bits in (args.from..=args.to).step_by(args.step) {
        let rows = bench_key_size(&config, bits, args.text.as_bytes())?;

        println!();
        println!("*RSA {bits}-bits*");
        println!("{TABLE_HEADER}");
        for row in &rows {
            println!("{row}");
        }
        if let Some(row) = rows.iter().find(|row| !row.verified) {
            bail!("{} at {bits} bits: decrypted text does not match the input", row.label);
        }
    }

    Ok(())
}

/// Time one key size: a raw row carrying the key generation time, then a padded row.
pub fn bench_key_size(config: &RsaConfig, bits: usize, text: &[u8]) -> anyhow::Result<[BenchRow; 2]> {
    let mut rsa = RsaProvider::with_config(config.clone());

    let start = Instant::now();
    rsa.initialize_parameters(bits)
        .with_context(|| format!("key generation failed for {bits} bits"))?;
    let keygen = start.elapsed();

    let params = rsa.parameters()?;
    log::debug!("{bits}-bit modulus: {}", hex::encode(to_bytes(params.modulus())));

    // Same input for both modes, so it has to fit the smaller capacity
    let len = rsa.max_message_len(false)?.min(rsa.max_message_len(true)?);
    let input = &text[..len.min(text.len())];
    log::info!("{bits} bits: {} byte input", input.len());

    let mut raw = time_codec(&mut rsa, input, false, "RSA")?;
    raw.keygen = Some(keygen);
    let padded = time_codec(&mut rsa, input, true, "RSA-OAEP")?;

    Ok([raw, padded])
}

fn time_codec(rsa: &mut RsaProvider, input: &[u8], use_padding: bool, label: &'static str) -> anyhow::Result<BenchRow> {
    let start = Instant::now();
    let ciphertext = rsa.encrypt(input, use_padding)?;
    let encrypt = start.elapsed();

    let start = Instant::now();
    let crt = rsa.decrypt(&ciphertext, use_padding, false)?;
    let decrypt_crt = start.elapsed();

    let start = Instant::now();
    let direct = rsa.decrypt(&ciphertext, use_padding, true)?;
    let decrypt_direct = start.elapsed();

    // Raw mode returns the minimal encoding, so compare as integers there
    let matches = |output: &[u8]| {
        if use_padding {
            output == input
        } else {
            from_bytes(output) == from_bytes(input)
        }
    };
    let verified = matches(crt.as_slice()) && matches(direct.as_slice());
    if !verified {
        log::error!("{label}: decrypted text does not match the input");
    }

    Ok(BenchRow {
        label,
        input_len: input.len(),
        keygen: None,
        encrypt,
        decrypt_crt,
        decrypt_direct,
        verified,
    })
}
