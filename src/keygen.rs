//! Key pair generation for a single network.
//!
//! A key comes from exactly one source, checked in this order:
//! 1. a custom private key (no seed, no path)
//! 2. a seed, from a custom mnemonic or fresh 256-bit entropy, used when a
//!    mnemonic, a path, a derivation strategy or `--all` is requested; a
//!    fresh mnemonic is always reported with the key
//! 3. a fresh random private key

use std::fmt;

use ed25519_dalek::SigningKey;
use secp256k1::SecretKey;

use crate::crypto::hash::sha256;
use crate::crypto::{
    normalize_mnemonic, Curve, DerivationPath, DerivedKey, ExtendedKey, PrivateKey, Seed,
    DEFAULT_ENTROPY_BITS,
};
use crate::error::{KeygenError, Result};
use crate::network::{
    decode_private_key, encode_address, encode_private_key, DerivationStrategy, Network,
};

/// Mnemonic reported for keys imported from a raw private key.
pub const MNEMONIC_PLACEHOLDER: &str = "(cannot derive mnemonic from private key)";

/// Derivation path reported for keys imported from a raw private key.
pub const PATH_PLACEHOLDER: &str = "(cannot derive path from private key)";

/// Options threaded into every [`generate_keys`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Report mnemonic and derivation path when derivable (`-a/--all`)
    pub include_info: bool,
    /// BIP-39 phrase to derive from instead of fresh entropy
    pub custom_mnemonic: Option<String>,
    /// Path to derive instead of the network default
    pub custom_path: Option<String>,
    /// Raw private key to import; bypasses seed and path handling
    pub custom_private_key: Option<String>,
    /// Overrides the network's derivation strategy
    pub derivation: Option<DerivationStrategy>,
}

impl GenerateOptions {
    /// Returns true if keys are derived from a seed rather than drawn at
    /// random.
    pub fn uses_seed(&self) -> bool {
        self.include_info
            || self.custom_mnemonic.is_some()
            || self.custom_path.is_some()
            || self.derivation.is_some()
    }
}

/// A generated key pair with its text encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    network: Network,
    public: String,
    private: String,
    mnemonic: Option<String>,
    derivation_path: Option<String>,
}

impl KeyPair {
    fn new(
        network: Network,
        private_key: &PrivateKey,
        mnemonic: Option<String>,
        derivation_path: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            network,
            public: encode_address(network, &private_key.public_key())?,
            private: encode_private_key(network, private_key)?,
            mnemonic,
            derivation_path,
        })
    }

    /// Returns the network this key pair belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the address.
    pub fn public(&self) -> &str {
        &self.public
    }

    /// Returns the encoded private key.
    pub fn private(&self) -> &str {
        &self.private
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }

    pub fn derivation_path(&self) -> Option<&str> {
        self.derivation_path.as_deref()
    }

    /// Returns the output lines: public, private, then mnemonic and
    /// derivation path when present.
    pub fn lines(&self) -> Vec<String> {
        let label = self.network.name();
        let line = |field: &str, value: &str| format!("{:<3} {:<12} {}", label, field, value);

        let mut lines = vec![line("public", &self.public), line("private", &self.private)];
        if let Some(mnemonic) = &self.mnemonic {
            lines.push(line("mnemonic", mnemonic));
            if let Some(path) = &self.derivation_path {
                lines.push(line("derivation", path));
            }
        }
        lines
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Generates one key pair for `network`.
///
/// Errors are returned unchanged to the caller; nothing is retried.
pub fn generate_keys(network: Network, options: &GenerateOptions) -> Result<KeyPair> {
    let profile = network.profile();

    if let Some(text) = &options.custom_private_key {
        let private_key = decode_private_key(network, text)?;
        let (mnemonic, path) = if options.include_info {
            (
                Some(MNEMONIC_PLACEHOLDER.to_string()),
                Some(PATH_PLACEHOLDER.to_string()),
            )
        } else {
            (None, None)
        };
        return KeyPair::new(network, &private_key, mnemonic, path);
    }

    if !options.uses_seed() {
        let private_key = PrivateKey::generate(profile.curve);
        return KeyPair::new(network, &private_key, None, None);
    }

    let strategy = resolve_strategy(network, options)?;
    let path = if strategy.uses_path() {
        let raw = options.custom_path.as_deref().unwrap_or(profile.default_path);
        Some(DerivationPath::parse(raw)?)
    } else if let Some(raw) = &options.custom_path {
        return Err(KeygenError::InvalidPathFormat(format!(
            "{} ({} derivation takes no path)",
            raw, strategy
        )));
    } else {
        None
    };

    let (mnemonic, seed) = match &options.custom_mnemonic {
        Some(phrase) => (normalize_mnemonic(phrase)?, Seed::from_mnemonic(phrase, "")?),
        None => Seed::from_entropy(DEFAULT_ENTROPY_BITS)?,
    };

    let private_key = derive_private_key(strategy, profile.curve, &seed, path.as_ref())?;

    // A fresh phrase is the only way back to the key, so it is always shown
    if options.include_info || options.custom_mnemonic.is_none() {
        let path = path.map(|p| p.to_string());
        KeyPair::new(network, &private_key, Some(mnemonic), path)
    } else {
        KeyPair::new(network, &private_key, None, None)
    }
}

/// Picks the derivation strategy: explicit override, else the profile's
/// path strategy when a custom path is given, else the profile default.
pub fn resolve_strategy(network: Network, options: &GenerateOptions) -> Result<DerivationStrategy> {
    let profile = network.profile();
    let strategy = match options.derivation {
        Some(strategy) => strategy,
        None if options.custom_path.is_some() => profile.path_derivation,
        None => profile.default_derivation,
    };

    if !strategy.supports(profile.curve) {
        return Err(KeygenError::UnsupportedDerivation {
            strategy: strategy.name(),
            network: profile.label,
        });
    }
    Ok(strategy)
}

/// Turns a seed into a private key with `strategy`.
///
/// `path` must be present for path-based strategies.
pub fn derive_private_key(
    strategy: DerivationStrategy,
    curve: Curve,
    seed: &Seed,
    path: Option<&DerivationPath>,
) -> Result<PrivateKey> {
    let unsupported = || KeygenError::UnsupportedDerivation {
        strategy: strategy.name(),
        network: match curve {
            Curve::Secp256k1 => "secp256k1",
            Curve::Ed25519 => "ed25519",
        },
    };
    let missing_path = || KeygenError::InvalidPathFormat(format!("{} needs a path", strategy));

    match (strategy, curve) {
        (DerivationStrategy::FullBip32, Curve::Secp256k1) => {
            let path = path.ok_or_else(missing_path)?;
            let key = ExtendedKey::master(seed.as_bytes())?.derive_path(path)?;
            Ok(PrivateKey::Secp256k1(*key.secret_key()))
        }
        (DerivationStrategy::Ed25519Tree, Curve::Ed25519) => {
            let path = path.ok_or_else(missing_path)?;
            let key = DerivedKey::derive_path(seed.as_bytes(), path)?;
            Ok(PrivateKey::Ed25519(key.to_signing_key()))
        }
        (DerivationStrategy::DirectSeedScalar, Curve::Secp256k1) => {
            let key = SecretKey::from_slice(&seed.head())
                .map_err(|_| KeygenError::DerivationOverflow { index: 0 })?;
            Ok(PrivateKey::Secp256k1(key))
        }
        (DerivationStrategy::DirectSeedScalar, Curve::Ed25519) => {
            Ok(PrivateKey::Ed25519(SigningKey::from_bytes(&seed.head())))
        }
        (DerivationStrategy::Sha256SeedScalar, Curve::Ed25519) => Ok(PrivateKey::Ed25519(
            SigningKey::from_bytes(&sha256(seed.as_bytes())),
        )),
        _ => Err(unsupported()),
    }
}
