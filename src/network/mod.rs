//! Supported networks and their static profiles.
//!
//! The variant set is closed: four Bitcoin address flavours, Ethereum and
//! Solana. Each variant maps to one `const` [`NetworkProfile`].

mod address;

use std::fmt;
use std::str::FromStr;

pub use address::{decode_private_key, encode_address, encode_private_key};

use crate::crypto::Curve;
use crate::error::KeygenError;

/// How a seed becomes private key material.
///
/// The strategies produce different keys from the same mnemonic; which one a
/// network uses is part of its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationStrategy {
    /// BIP-32 over secp256k1 along the derivation path
    FullBip32,
    /// First 32 bytes of the seed used directly as the private key
    DirectSeedScalar,
    /// SHA-256 of the seed used as the ed25519 secret
    Sha256SeedScalar,
    /// SLIP-0010 ed25519 tree along an all-hardened path
    Ed25519Tree,
}

impl DerivationStrategy {
    /// Returns true if the strategy walks a derivation path.
    pub const fn uses_path(self) -> bool {
        matches!(self, Self::FullBip32 | Self::Ed25519Tree)
    }

    /// Returns true if the strategy can produce keys on `curve`.
    pub const fn supports(self, curve: Curve) -> bool {
        match self {
            Self::FullBip32 => matches!(curve, Curve::Secp256k1),
            Self::DirectSeedScalar => true,
            Self::Sha256SeedScalar | Self::Ed25519Tree => matches!(curve, Curve::Ed25519),
        }
    }

    /// Returns the command-line name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullBip32 => "full-bip32",
            Self::DirectSeedScalar => "direct-seed",
            Self::Sha256SeedScalar => "sha256-seed",
            Self::Ed25519Tree => "ed25519-tree",
        }
    }
}

impl FromStr for DerivationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full-bip32" | "bip32" => Ok(Self::FullBip32),
            "direct-seed" | "direct" => Ok(Self::DirectSeedScalar),
            "sha256-seed" | "sha256" => Ok(Self::Sha256SeedScalar),
            "ed25519-tree" | "slip10" => Ok(Self::Ed25519Tree),
            _ => Err(format!("Unknown derivation strategy: {}", s)),
        }
    }
}

impl fmt::Display for DerivationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static configuration for one network variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Label used in output lines
    pub label: &'static str,
    /// Version byte of Base58Check address payloads
    pub pubkey_hash_version: u8,
    /// WIF version byte
    pub private_key_version: u8,
    pub segwit: bool,
    pub native_segwit: bool,
    pub taproot: bool,
    /// Path used when no custom path is supplied
    pub default_path: &'static str,
    /// Strategy used when none is requested
    pub default_derivation: DerivationStrategy,
    /// Strategy used when a custom path is supplied
    pub path_derivation: DerivationStrategy,
    pub curve: Curve,
}

const BITCOIN_LEGACY: NetworkProfile = NetworkProfile {
    label: "bitcoin legacy",
    pubkey_hash_version: 0x00,
    private_key_version: 0x80,
    segwit: false,
    native_segwit: false,
    taproot: false,
    default_path: "m/44'/0'/0'/0/0",
    default_derivation: DerivationStrategy::FullBip32,
    path_derivation: DerivationStrategy::FullBip32,
    curve: Curve::Secp256k1,
};

const BITCOIN_SEGWIT: NetworkProfile = NetworkProfile {
    label: "bitcoin segwit",
    pubkey_hash_version: 0x05,
    default_path: "m/49'/0'/0'/0/0",
    segwit: true,
    ..BITCOIN_LEGACY
};

const BITCOIN_NATIVE: NetworkProfile = NetworkProfile {
    label: "bitcoin native",
    pubkey_hash_version: 0x04,
    default_path: "m/84'/0'/0'/0/0",
    segwit: true,
    native_segwit: true,
    ..BITCOIN_LEGACY
};

const BITCOIN_TAPROOT: NetworkProfile = NetworkProfile {
    label: "bitcoin taproot",
    default_path: "m/86'/0'/0'/0/0",
    taproot: true,
    ..BITCOIN_NATIVE
};

const ETHEREUM: NetworkProfile = NetworkProfile {
    label: "ethereum",
    pubkey_hash_version: 0x00,
    private_key_version: 0x00,
    segwit: false,
    native_segwit: false,
    taproot: false,
    default_path: "m/44'/60'/0'/0/0",
    default_derivation: DerivationStrategy::FullBip32,
    path_derivation: DerivationStrategy::FullBip32,
    curve: Curve::Secp256k1,
};

// Without a custom path Solana keeps the seed-hash shortcut; a custom path
// switches to SLIP-0010. The two give different keys for one mnemonic.
const SOLANA: NetworkProfile = NetworkProfile {
    label: "solana",
    default_path: "m/44'/501'/0'/0'",
    default_derivation: DerivationStrategy::Sha256SeedScalar,
    path_derivation: DerivationStrategy::Ed25519Tree,
    curve: Curve::Ed25519,
    ..ETHEREUM
};

/// A supported network variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    BitcoinLegacy,
    BitcoinSegwit,
    BitcoinNative,
    BitcoinTaproot,
    Ethereum,
    Solana,
}

impl Network {
    /// Every supported variant.
    pub const ALL: [Network; 6] = [
        Network::BitcoinLegacy,
        Network::BitcoinSegwit,
        Network::BitcoinNative,
        Network::BitcoinTaproot,
        Network::Ethereum,
        Network::Solana,
    ];

    /// Returns the static profile for this variant.
    pub const fn profile(self) -> &'static NetworkProfile {
        match self {
            Network::BitcoinLegacy => &BITCOIN_LEGACY,
            Network::BitcoinSegwit => &BITCOIN_SEGWIT,
            Network::BitcoinNative => &BITCOIN_NATIVE,
            Network::BitcoinTaproot => &BITCOIN_TAPROOT,
            Network::Ethereum => &ETHEREUM,
            Network::Solana => &SOLANA,
        }
    }

    /// Returns the label used in output lines.
    pub const fn name(self) -> &'static str {
        self.profile().label
    }

    /// Returns true for the Bitcoin address variants.
    pub const fn is_bitcoin(self) -> bool {
        matches!(
            self,
            Network::BitcoinLegacy
                | Network::BitcoinSegwit
                | Network::BitcoinNative
                | Network::BitcoinTaproot
        )
    }

    /// Returns the number of distinct address characters after case folding.
    pub const fn address_alphabet(self) -> u64 {
        match self {
            // base58 folds to 1-9 plus a-z
            Network::BitcoinLegacy | Network::BitcoinSegwit | Network::Solana => 35,
            Network::BitcoinNative | Network::BitcoinTaproot => 32,
            Network::Ethereum => 16,
        }
    }

    /// Returns true if `arg` is a network selector.
    pub fn is_selector(arg: &str) -> bool {
        arg.parse::<Network>().is_ok()
    }
}

impl FromStr for Network {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" | "legacy" | "bitcoin" => Ok(Network::BitcoinLegacy),
            "btcs" | "segwit" => Ok(Network::BitcoinSegwit),
            "btcn" | "native" => Ok(Network::BitcoinNative),
            "btct" | "taproot" => Ok(Network::BitcoinTaproot),
            "eth" | "ethereum" => Ok(Network::Ethereum),
            "sol" | "solana" => Ok(Network::Solana),
            _ => Err(KeygenError::NetworkNotFound(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
