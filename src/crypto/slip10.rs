//! SLIP-0010 ed25519 key derivation.
//!
//! Only hardened children exist for ed25519; every step mixes in the parent
//! private key.

use ed25519_dalek::SigningKey;

use super::hash::hmac_sha512;
use super::path::DerivationPath;
use crate::error::Result;

const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// A SLIP-0010 node: 32-byte private key and chain code.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey {
    private_key: [u8; 32],
    chain_code: [u8; 32],
}

impl DerivedKey {
    /// Derives the master node from seed bytes.
    pub fn from_seed(seed: &[u8]) -> Self {
        let (private_key, chain_code) = hmac_sha512(ED25519_CURVE, &[seed]);
        Self {
            private_key,
            chain_code,
        }
    }

    /// Derives the hardened child at `index` (offset applied here).
    pub fn derive_hardened(&self, index: u32) -> Self {
        let hardened_index = index | 0x8000_0000;
        let (private_key, chain_code) = hmac_sha512(
            &self.chain_code,
            &[&[0x00], &self.private_key, &hardened_index.to_be_bytes()],
        );
        Self {
            private_key,
            chain_code,
        }
    }

    /// Derives the node at `path` from a seed.
    ///
    /// Fails with `NonHardenedSegmentNotAllowed` if any segment lacks the
    /// hardened marker.
    pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        path.require_hardened()?;
        Ok(path
            .indices()
            .iter()
            .fold(Self::from_seed(seed), |key, index| {
                key.derive_hardened(index.index())
            }))
    }

    /// Returns the private key bytes.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    /// Returns the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Converts to an ed25519 signing key.
    pub fn to_signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.private_key)
    }
}
