//! Cryptographic building blocks for key generation.
//!
//! This module provides:
//! - BIP-32 derivation paths and BIP-39 seeds
//! - secp256k1 BIP-32 and ed25519 SLIP-0010 derivation
//! - Hash helpers and curve-tagged key material

pub mod hash;
mod hd;
mod keypair;
mod path;
mod seed;
mod slip10;

pub use hd::ExtendedKey;
pub use keypair::{Curve, PrivateKey, PublicKey};
pub use path::{ChildIndex, DerivationPath};
pub use seed::{normalize_mnemonic, Seed, DEFAULT_ENTROPY_BITS};
pub use slip10::DerivedKey;
