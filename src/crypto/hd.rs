//! BIP-32 hierarchical deterministic derivation over secp256k1.

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};

use super::hash::{hash160, hmac_sha512};
use super::path::{ChildIndex, DerivationPath};
use crate::error::{KeygenError, Result};

/// HMAC key for master key generation.
const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// Mainnet `xprv` version bytes.
const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

/// An extended private key: key material plus chain code and position in the
/// tree.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    secret_key: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl ExtendedKey {
    /// Derives the master key from seed bytes.
    pub fn master(seed: &[u8]) -> Result<Self> {
        let (key, chain_code) = hmac_sha512(MASTER_KEY_SALT, &[seed]);
        let secret_key =
            SecretKey::from_slice(&key).map_err(|_| KeygenError::DerivationOverflow { index: 0 })?;

        Ok(Self {
            secret_key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derives one child key (CKDpriv).
    ///
    /// An out-of-range tweak or a zero child scalar is reported as
    /// `DerivationOverflow`; the next index is not attempted. Depth is a
    /// single byte, so a child of a depth-255 key is `DepthExceeded`.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        let depth = self.depth.checked_add(1).ok_or(KeygenError::DepthExceeded)?;
        let secp = Secp256k1::new();
        let raw_index = index.to_u32();
        let parent_public = PublicKey::from_secret_key(&secp, &self.secret_key);

        let (tweak, chain_code) = if index.is_hardened() {
            hmac_sha512(
                &self.chain_code,
                &[
                    &[0u8],
                    &self.secret_key.secret_bytes(),
                    &raw_index.to_be_bytes(),
                ],
            )
        } else {
            hmac_sha512(
                &self.chain_code,
                &[&parent_public.serialize(), &raw_index.to_be_bytes()],
            )
        };

        let tweak = Scalar::from_be_bytes(tweak)
            .map_err(|_| KeygenError::DerivationOverflow { index: raw_index })?;
        let secret_key = self
            .secret_key
            .add_tweak(&tweak)
            .map_err(|_| KeygenError::DerivationOverflow { index: raw_index })?;

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&hash160(&parent_public.serialize())[..4]);

        Ok(Self {
            secret_key,
            chain_code,
            depth,
            parent_fingerprint,
            child_number: raw_index,
        })
    }

    /// Walks `path` from this key, left to right.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, index| key.derive_child(*index))
    }

    /// Returns the private key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Returns the depth in the tree (0 for the master key).
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Serializes to a mainnet `xprv` Base58Check string.
    pub fn to_xprv(&self) -> String {
        let mut payload = Vec::with_capacity(78);
        payload.extend_from_slice(&XPRV_VERSION);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_number.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.push(0);
        payload.extend_from_slice(&self.secret_key.secret_bytes());

        bs58::encode(payload).with_check().into_string()
    }
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}
