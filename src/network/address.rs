//! Address and private-key text encodings per network.
//!
//! | Variant        | Address                                      |
//! |----------------|----------------------------------------------|
//! | legacy         | Base58Check(0x00, HASH160(pubkey))           |
//! | segwit         | Base58Check(0x05, HASH160(P2WPKH script))    |
//! | native segwit  | Bech32 `bc`, witness v0, HASH160(pubkey)     |
//! | taproot        | Bech32m `bc`, witness v1, tweaked x-only key |
//! | ethereum       | `0x` + last 20 bytes of Keccak-256(pubkey)   |
//! | solana         | Base58 of the ed25519 public key             |

use bech32::hrp;
use ed25519_dalek::SigningKey;
use secp256k1::{Scalar, Secp256k1, SecretKey};

use super::{Network, NetworkProfile};
use crate::crypto::hash::{hash160, keccak256, tagged_hash};
use crate::crypto::{PrivateKey, PublicKey};
use crate::error::{KeygenError, Result};

/// WIF suffix marking a compressed public key.
const WIF_COMPRESSED: u8 = 0x01;

/// Encodes `public_key` as the canonical address of `network`.
pub fn encode_address(network: Network, public_key: &PublicKey) -> Result<String> {
    let profile = network.profile();
    match (network, public_key) {
        (Network::Ethereum, PublicKey::Secp256k1(key)) => Ok(ethereum_address(key)),
        (Network::Solana, PublicKey::Ed25519(key)) => Ok(bs58::encode(key.as_bytes()).into_string()),
        (_, PublicKey::Secp256k1(key)) if network.is_bitcoin() => bitcoin_address(profile, key),
        _ => Err(KeygenError::encoding(
            "public key",
            format!("{} cannot encode a key on this curve", profile.label),
        )),
    }
}

/// Encodes `private_key` in the text format of `network`: WIF for Bitcoin,
/// bare lower-case hex for Ethereum, Base58 secret‖public for Solana.
pub fn encode_private_key(network: Network, private_key: &PrivateKey) -> Result<String> {
    let profile = network.profile();
    match (network, private_key) {
        (Network::Ethereum, PrivateKey::Secp256k1(key)) => Ok(hex::encode(key.secret_bytes())),
        (Network::Solana, PrivateKey::Ed25519(key)) => {
            Ok(bs58::encode(key.to_keypair_bytes()).into_string())
        }
        (_, PrivateKey::Secp256k1(key)) if network.is_bitcoin() => {
            let mut payload = Vec::with_capacity(34);
            payload.push(profile.private_key_version);
            payload.extend_from_slice(&key.secret_bytes());
            payload.push(WIF_COMPRESSED);
            Ok(bs58::encode(payload).with_check().into_string())
        }
        _ => Err(KeygenError::encoding(
            "private key",
            format!("{} cannot encode a key on this curve", profile.label),
        )),
    }
}

/// Decodes a user-supplied private key.
///
/// Accepts a compressed mainnet WIF for Bitcoin, 32 hex bytes (optional
/// `0x`) for Ethereum and Base58 of either the 64-byte keypair or the
/// 32-byte secret for Solana.
pub fn decode_private_key(network: Network, text: &str) -> Result<PrivateKey> {
    let text = text.trim();
    let invalid = |reason: &str| KeygenError::InvalidPrivateKeyFormat(reason.to_string());

    match network {
        Network::Ethereum => {
            let digits = text.strip_prefix("0x").unwrap_or(text);
            let bytes = hex::decode(digits)
                .map_err(|e| KeygenError::InvalidPrivateKeyFormat(e.to_string()))?;
            if bytes.len() != 32 {
                return Err(invalid("expected 32 bytes of hex"));
            }
            let key = SecretKey::from_slice(&bytes).map_err(|_| invalid("scalar out of range"))?;
            Ok(PrivateKey::Secp256k1(key))
        }
        Network::Solana => {
            let bytes = bs58::decode(text)
                .into_vec()
                .map_err(|e| KeygenError::InvalidPrivateKeyFormat(e.to_string()))?;
            let key = match bytes.len() {
                64 => {
                    let mut keypair = [0u8; 64];
                    keypair.copy_from_slice(&bytes);
                    SigningKey::from_keypair_bytes(&keypair)
                        .map_err(|_| invalid("public half does not match the secret"))?
                }
                32 => {
                    let mut secret = [0u8; 32];
                    secret.copy_from_slice(&bytes);
                    SigningKey::from_bytes(&secret)
                }
                _ => return Err(invalid("expected a 64-byte keypair or 32-byte secret")),
            };
            Ok(PrivateKey::Ed25519(key))
        }
        _ => {
            let payload = bs58::decode(text)
                .with_check(None)
                .into_vec()
                .map_err(|e| {
                    KeygenError::InvalidPrivateKeyFormat(format!("failed to decode WIF: {}", e))
                })?;
            if payload.first() != Some(&network.profile().private_key_version) {
                return Err(invalid("private key is not for mainnet"));
            }
            if payload.len() != 34 || payload[33] != WIF_COMPRESSED {
                return Err(invalid("only compressed WIF keys are supported"));
            }
            let key = SecretKey::from_slice(&payload[1..33])
                .map_err(|_| invalid("scalar out of range"))?;
            Ok(PrivateKey::Secp256k1(key))
        }
    }
}

fn ethereum_address(public_key: &secp256k1::PublicKey) -> String {
    // Skip the 0x04 prefix and hash the remaining 64 bytes
    let hash = keccak256(&public_key.serialize_uncompressed()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

fn bitcoin_address(profile: &NetworkProfile, public_key: &secp256k1::PublicKey) -> Result<String> {
    if profile.taproot {
        let program = taproot_output_key(public_key)?;
        return bech32::segwit::encode_v1(hrp::BC, &program)
            .map_err(|e| KeygenError::encoding("bech32m", e));
    }

    let pubkey_hash = hash160(&public_key.serialize());

    if profile.native_segwit {
        return bech32::segwit::encode_v0(hrp::BC, &pubkey_hash)
            .map_err(|e| KeygenError::encoding("bech32", e));
    }

    let mut payload = Vec::with_capacity(21);
    payload.push(profile.pubkey_hash_version);
    if profile.segwit {
        // P2SH-wrapped P2WPKH: OP_0 PUSH20 <pubkey hash>
        let mut script = Vec::with_capacity(22);
        script.extend_from_slice(&[0x00, 0x14]);
        script.extend_from_slice(&pubkey_hash);
        payload.extend_from_slice(&hash160(&script));
    } else {
        payload.extend_from_slice(&pubkey_hash);
    }
    Ok(bs58::encode(payload).with_check().into_string())
}

/// BIP-86 output key: the internal key tweaked by `H_TapTweak(P.x)`, with no
/// script tree.
fn taproot_output_key(public_key: &secp256k1::PublicKey) -> Result<[u8; 32]> {
    let secp = Secp256k1::verification_only();
    let (internal_key, _) = public_key.x_only_public_key();
    let tweak = tagged_hash("TapTweak", &internal_key.serialize());
    let tweak = Scalar::from_be_bytes(tweak).map_err(|e| KeygenError::encoding("taproot tweak", e))?;
    let (output_key, _) = internal_key
        .add_tweak(&secp, &tweak)
        .map_err(|e| KeygenError::encoding("taproot tweak", e))?;
    Ok(output_key.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secp_key(hex_str: &str) -> PrivateKey {
        PrivateKey::Secp256k1(SecretKey::from_slice(&hex::decode(hex_str).unwrap()).unwrap())
    }

    fn address(network: Network, key: &PrivateKey) -> String {
        encode_address(network, &key.public_key()).unwrap()
    }

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_bitcoin_addresses_for_key_one() {
        let key = secp_key(KEY_ONE);
        assert_eq!(
            address(Network::BitcoinLegacy, &key),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            address(Network::BitcoinSegwit, &key),
            "3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN"
        );
        assert_eq!(
            address(Network::BitcoinNative, &key),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        assert_eq!(
            address(Network::BitcoinTaproot, &key),
            "bc1pmfr3p9j00pfxjh0zmgp99y8zftmd3s5pmedqhyptwy6lm87hf5sspknck9"
        );
    }

    #[test]
    fn test_ethereum_address() {
        // Address for private key = 1 is well-known
        assert_eq!(
            address(Network::Ethereum, &secp_key(KEY_ONE)),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            address(Network::Ethereum, &secp_key(&"46".repeat(32))),
            "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
        );
    }

    #[test]
    fn test_solana_address() {
        let secret: [u8; 32] = core::array::from_fn(|i| i as u8);
        let key = PrivateKey::Ed25519(SigningKey::from_bytes(&secret));
        assert_eq!(
            address(Network::Solana, &key),
            "FAe4sisG95oZ42w7buUn5qEE4TAnfTTFPiguZUHmhiF"
        );
        assert_eq!(
            encode_private_key(Network::Solana, &key).unwrap(),
            "1GMkH3brNXiNNs1tiFZHu4yZSRrzJwxi5wB9bHFtMikjwpAW9DMZzU2Pqakc5it8X3N5vPmqdN7KF4CCUpmKhq"
        );
    }

    #[test]
    fn test_wif_encoding() {
        let key = secp_key(KEY_ONE);
        for network in &Network::ALL[..4] {
            assert_eq!(
                encode_private_key(*network, &key).unwrap(),
                "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
            );
        }
        assert_eq!(
            encode_private_key(Network::Ethereum, &key).unwrap(),
            KEY_ONE
        );
    }

    #[test]
    fn test_curve_mismatch_fails_closed() {
        let ed = PrivateKey::Ed25519(SigningKey::from_bytes(&[7u8; 32]));
        assert!(matches!(
            encode_address(Network::BitcoinNative, &ed.public_key()),
            Err(KeygenError::AddressEncoding { step: "public key", .. })
        ));
        assert!(matches!(
            encode_address(Network::Solana, &secp_key(KEY_ONE).public_key()),
            Err(KeygenError::AddressEncoding { .. })
        ));
        assert!(encode_private_key(Network::Ethereum, &ed).is_err());
    }

    #[test]
    fn test_decode_wif() {
        let key = decode_private_key(
            Network::BitcoinTaproot,
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn",
        )
        .unwrap();
        assert_eq!(key.secret_bytes(), secp_key(KEY_ONE).secret_bytes());

        // Corrupted checksum
        assert!(matches!(
            decode_private_key(
                Network::BitcoinLegacy,
                "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWm"
            ),
            Err(KeygenError::InvalidPrivateKeyFormat(_))
        ));
    }

    #[test]
    fn test_decode_wif_rejects_testnet() {
        let mut payload = vec![0xef];
        payload.extend_from_slice(&hex::decode(KEY_ONE).unwrap());
        payload.push(WIF_COMPRESSED);
        let testnet = bs58::encode(payload).with_check().into_string();
        assert!(matches!(
            decode_private_key(Network::BitcoinLegacy, &testnet),
            Err(KeygenError::InvalidPrivateKeyFormat(_))
        ));
    }

    #[test]
    fn test_decode_ethereum_hex() {
        let plain = decode_private_key(Network::Ethereum, &"46".repeat(32)).unwrap();
        let prefixed =
            decode_private_key(Network::Ethereum, &format!("0x{}", "46".repeat(32))).unwrap();
        assert_eq!(plain.secret_bytes(), prefixed.secret_bytes());

        for bad in ["0x1234", "zz", ""] {
            assert!(matches!(
                decode_private_key(Network::Ethereum, bad),
                Err(KeygenError::InvalidPrivateKeyFormat(_))
            ));
        }
        assert!(decode_private_key(Network::Ethereum, &"00".repeat(32)).is_err());
    }

    #[test]
    fn test_decode_solana_keypair() {
        let key = decode_private_key(
            Network::Solana,
            "27npWoNE4HfmLeQo1TyWcW7NEA28qnsnDK7kcttDQEWrCWnro83HMJ97rMmpvYYZRwDAvG4KRuB7hTBacvwD7bgi",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key.secret_bytes()),
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445"
        );
        assert_eq!(
            address(Network::Solana, &key),
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );

        let secret_only = bs58::encode(key.secret_bytes()).into_string();
        let from_secret = decode_private_key(Network::Solana, &secret_only).unwrap();
        assert_eq!(from_secret.secret_bytes(), key.secret_bytes());
    }

    #[test]
    fn test_decode_solana_mismatched_public_half() {
        let mut keypair = [0u8; 64];
        keypair[..32].copy_from_slice(&[1u8; 32]);
        keypair[32..].copy_from_slice(
            SigningKey::from_bytes(&[2u8; 32]).verifying_key().as_bytes(),
        );
        let text = bs58::encode(keypair).into_string();
        assert!(matches!(
            decode_private_key(Network::Solana, &text),
            Err(KeygenError::InvalidPrivateKeyFormat(_))
        ));
    }
}
