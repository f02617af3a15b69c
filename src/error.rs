//! Error types for key generation, derivation and address encoding.

/// Errors produced while deriving keys or encoding addresses.
///
/// Every variant describes malformed caller input or an impossible
/// cryptographic edge case; none of them is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("invalid derivation path: {0}")]
    InvalidPathFormat(String),

    #[error("invalid segment in derivation path: {0}")]
    InvalidPathSegment(String),

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    /// BIP-32 produced an out-of-range child scalar. Fatal: the next index
    /// is not tried.
    #[error("derivation overflow at index {index:#010x}")]
    DerivationOverflow { index: u32 },

    #[error("derivation path deeper than 255 levels")]
    DepthExceeded,

    #[error("non-hardened segment {0} not allowed for ed25519 derivation")]
    NonHardenedSegmentNotAllowed(String),

    #[error("address encoding failed at {step}: {reason}")]
    AddressEncoding { step: &'static str, reason: String },

    #[error("invalid private key format: {0}")]
    InvalidPrivateKeyFormat(String),

    #[error("{0:?} not found")]
    NetworkNotFound(String),

    #[error("{strategy} derivation is not supported for {network}")]
    UnsupportedDerivation {
        strategy: &'static str,
        network: &'static str,
    },

    #[error("entropy generation failed: {0}")]
    Entropy(String),
}

impl KeygenError {
    pub(crate) fn encoding(step: &'static str, reason: impl ToString) -> Self {
        Self::AddressEncoding {
            step,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KeygenError>;
