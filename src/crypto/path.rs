//! BIP-32 derivation paths.
//!
//! Paths look like `m/44'/60'/0'/0/0`: the literal root marker `m` followed
//! by `/`-separated indices, where a trailing `'` marks a hardened index.

use std::fmt;
use std::str::FromStr;

use crate::error::{KeygenError, Result};

/// A single step in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildIndex {
    /// Normal index, `0..2^31`
    Normal(u32),
    /// Hardened index, stored without the hardened offset
    Hardened(u32),
}

impl ChildIndex {
    /// Offset added to hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Returns true for hardened indices.
    #[inline]
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Returns the index without the hardened offset.
    #[inline]
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Returns the raw value fed into child key derivation.
    #[inline]
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i + Self::HARDENED_OFFSET,
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{}", i),
            Self::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = KeygenError;

    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (segment, false),
        };

        // u32::from_str accepts a leading '+', BIP-32 paths do not
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeygenError::InvalidPathSegment(segment.to_string()));
        }

        let index: u32 = digits
            .parse()
            .map_err(|_| KeygenError::InvalidPathSegment(segment.to_string()))?;
        if index >= Self::HARDENED_OFFSET {
            return Err(KeygenError::InvalidPathSegment(segment.to_string()));
        }

        Ok(if hardened {
            Self::Hardened(index)
        } else {
            Self::Normal(index)
        })
    }
}

/// A parsed, non-empty BIP-32 derivation path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Parses a path string such as `m/84'/0'/0'/0/0`.
    pub fn parse(path: &str) -> Result<Self> {
        let mut tokens = path.split('/');
        if tokens.next() != Some("m") {
            return Err(KeygenError::InvalidPathFormat(path.to_string()));
        }

        let indices = tokens
            .map(ChildIndex::from_str)
            .collect::<Result<Vec<_>>>()?;
        if indices.is_empty() {
            return Err(KeygenError::InvalidPathFormat(path.to_string()));
        }

        Ok(Self { indices })
    }

    /// Returns the child indices in derivation order.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Returns the number of derivation steps.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Fails on the first segment that is not hardened.
    ///
    /// Ed25519 tree derivation has no public-key (normal) derivation.
    pub fn require_hardened(&self) -> Result<()> {
        match self.indices.iter().find(|index| !index.is_hardened()) {
            Some(index) => Err(KeygenError::NonHardenedSegmentNotAllowed(index.to_string())),
            None => Ok(()),
        }
    }
}

impl FromStr for DerivationPath {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
