//! # chain_vanity
//!
//! Key pair generator for Bitcoin (legacy, SegWit, native SegWit, Taproot),
//! Ethereum and Solana, with HD derivation and vanity address search.
//!
//! ## Architecture
//!
//! - `crypto`: Hashing, BIP-32/BIP-39/SLIP-0010 derivation and key types
//! - `network`: Network profiles and address / private key encodings
//! - `keygen`: Single key pair generation from the configured source
//! - `matcher`: Vanity word matching
//! - `worker`: Single-threaded search and parallel worker pool
//! - `config`: Command-line configuration

pub mod config;
pub mod crypto;
pub mod error;
pub mod keygen;
pub mod matcher;
pub mod network;
pub mod worker;

pub use config::{Config, ConfigError};
pub use crypto::{DerivationPath, PrivateKey, PublicKey, Seed};
pub use error::{KeygenError, Result};
pub use keygen::{generate_keys, GenerateOptions, KeyPair};
pub use matcher::{MatchMode, Pattern};
pub use network::{DerivationStrategy, Network, NetworkProfile};
pub use worker::{SearchSummary, VanityResult, VanitySearcher, WorkerPool, MATCH_LIMIT};
