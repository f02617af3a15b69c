//! BIP-39 mnemonics and seeds.

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{KeygenError, Result};

/// Entropy size used for freshly generated mnemonics (24 words).
pub const DEFAULT_ENTROPY_BITS: usize = 256;

/// A 512-bit BIP-39 seed.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Stretches a mnemonic into a seed (PBKDF2-HMAC-SHA512, 2048 rounds).
    ///
    /// The phrase is checked against the English word list and its checksum
    /// before use. Runs of whitespace between words are collapsed. The
    /// passphrase is used as given and must already be NFKD-normalized.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self> {
        let mnemonic = parse_mnemonic(phrase)?;
        Ok(Self(mnemonic.to_seed_normalized(passphrase)))
    }

    /// Generates fresh OS entropy and returns its mnemonic with the derived
    /// seed (empty passphrase).
    pub fn from_entropy(bits: usize) -> Result<(String, Self)> {
        if !matches!(bits, 128 | 160 | 192 | 224 | 256) {
            return Err(KeygenError::Entropy(format!(
                "unsupported entropy size: {} bits",
                bits
            )));
        }

        let mut entropy = [0u8; 32];
        let entropy = &mut entropy[..bits / 8];
        OsRng
            .try_fill_bytes(entropy)
            .map_err(|e| KeygenError::Entropy(e.to_string()))?;

        let mnemonic =
            Mnemonic::from_entropy(entropy).map_err(|e| KeygenError::Entropy(e.to_string()))?;
        let seed = Self(mnemonic.to_seed_normalized(""));
        Ok((mnemonic.to_string(), seed))
    }

    /// Returns the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Returns the first 32 bytes, used by the seed-as-scalar strategies.
    pub fn head(&self) -> [u8; 32] {
        let mut head = [0u8; 32];
        head.copy_from_slice(&self.0[..32]);
        head
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Validates a phrase and returns it with whitespace normalised.
pub fn normalize_mnemonic(phrase: &str) -> Result<String> {
    parse_mnemonic(phrase).map(|mnemonic| mnemonic.to_string())
}

fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    let words = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    Mnemonic::parse_in_normalized(Language::English, &words)
        .map_err(|e| KeygenError::InvalidMnemonic(e.to_string()))
}
