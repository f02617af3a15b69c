//! Raw key material for the two supported curves.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::RngCore;
use secp256k1::{Secp256k1, SecretKey};

/// Elliptic curve used by a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Secp256k1,
    Ed25519,
}

/// A private key on one of the supported curves.
#[derive(Clone)]
pub enum PrivateKey {
    Secp256k1(SecretKey),
    Ed25519(SigningKey),
}

/// A public key on one of the supported curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(secp256k1::PublicKey),
    Ed25519(VerifyingKey),
}

impl PrivateKey {
    /// Generates a new random key.
    ///
    /// Uses a cryptographically secure random number generator.
    pub fn generate(curve: Curve) -> Self {
        match curve {
            Curve::Secp256k1 => {
                let secp = Secp256k1::new();
                let (secret_key, _) = secp.generate_keypair(&mut rand::thread_rng());
                Self::Secp256k1(secret_key)
            }
            Curve::Ed25519 => {
                let mut secret = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut secret);
                Self::Ed25519(SigningKey::from_bytes(&secret))
            }
        }
    }

    /// Returns the curve this key lives on.
    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1(_) => Curve::Secp256k1,
            Self::Ed25519(_) => Curve::Ed25519,
        }
    }

    /// Computes the matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(secret_key) => {
                let secp = Secp256k1::new();
                PublicKey::Secp256k1(secret_key.public_key(&secp))
            }
            Self::Ed25519(signing_key) => PublicKey::Ed25519(signing_key.verifying_key()),
        }
    }

    /// Returns the 32 secret bytes.
    pub fn secret_bytes(&self) -> [u8; 32] {
        match self {
            Self::Secp256k1(secret_key) => secret_key.secret_bytes(),
            Self::Ed25519(signing_key) => signing_key.to_bytes(),
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({:?}, [REDACTED])", self.curve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_keys_differ() {
        for curve in [Curve::Secp256k1, Curve::Ed25519] {
            let a = PrivateKey::generate(curve);
            let b = PrivateKey::generate(curve);
            assert_eq!(a.curve(), curve);
            assert_ne!(a.secret_bytes(), b.secret_bytes());
        }
    }

    #[test]
    fn test_public_key_matches_curve() {
        let secp = PrivateKey::generate(Curve::Secp256k1);
        assert!(matches!(secp.public_key(), PublicKey::Secp256k1(_)));

        let ed = PrivateKey::generate(Curve::Ed25519);
        assert!(matches!(ed.public_key(), PublicKey::Ed25519(_)));
    }
}
