//! Runtime configuration for the key generator.

use crate::keygen::GenerateOptions;
use crate::matcher::{MatchMode, Pattern};
use crate::network::{DerivationStrategy, Network};
use clap::Parser;

/// Generate key pairs for Bitcoin, Ethereum and Solana.
///
/// NETWORK is one of btc|legacy|bitcoin, btcs|segwit, btcn|native,
/// btct|taproot, eth|ethereum, sol|solana and may appear anywhere.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Network selector
    #[arg(value_name = "NETWORK")]
    pub network: Network,

    /// Print mnemonic and derivation path when derivable
    #[arg(short, long, visible_alias = "mnemonic", short_alias = 'm')]
    pub all: bool,

    /// Comma-separated words the address should include
    #[arg(short, long, value_name = "WORDS")]
    pub include: Option<String>,

    /// Match include words at the start of the address
    #[arg(long, conflicts_with = "postfix")]
    pub prefix: bool,

    /// Match include words at the end of the address
    #[arg(long)]
    pub postfix: bool,

    /// BIP-39 mnemonic to derive from
    #[arg(long = "custom_mnemonic", value_name = "PHRASE")]
    pub custom_mnemonic: Option<String>,

    /// Derivation path to use instead of the network default
    #[arg(long = "custom_path", value_name = "PATH")]
    pub custom_path: Option<String>,

    /// Private key to import (WIF, hex or base58 depending on network)
    #[arg(long = "custom_private", value_name = "KEY")]
    pub custom_private: Option<String>,

    /// Seed derivation: full-bip32, direct-seed, sha256-seed or ed25519-tree
    #[arg(long, value_name = "STRATEGY")]
    pub derivation: Option<DerivationStrategy>,

    /// Number of search threads (default: number of CPU cores, 1 = no pool)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Search progress interval in seconds (0 = off)
    #[arg(short = 'r', long, default_value = "5")]
    pub report_interval: u64,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(include) = &self.include {
            if include.split(',').any(str::is_empty) {
                return Err(ConfigError::InvalidPattern(format!(
                    "empty word in {:?}",
                    include
                )));
            }
        }

        if self.custom_private.is_some() {
            let conflicting = [
                ("--custom_mnemonic", self.custom_mnemonic.is_some()),
                ("--custom_path", self.custom_path.is_some()),
                ("--derivation", self.derivation.is_some()),
                ("--include", self.include.is_some()),
            ];
            if let Some((name, _)) = conflicting.iter().find(|(_, set)| *set) {
                return Err(ConfigError::ConflictingOptions(format!(
                    "--custom_private cannot be combined with {}",
                    name
                )));
            }
        }

        // A fixed mnemonic yields the same key on every search iteration
        if self.include.is_some() && self.custom_mnemonic.is_some() {
            return Err(ConfigError::ConflictingOptions(
                "--custom_mnemonic cannot be combined with --include".into(),
            ));
        }

        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkerCount);
        }

        Ok(())
    }

    /// Returns the match mode selected by --prefix / --postfix
    pub fn match_mode(&self) -> MatchMode {
        if self.prefix {
            MatchMode::Prefix
        } else if self.postfix {
            MatchMode::Postfix
        } else {
            MatchMode::Substring
        }
    }

    /// Returns the vanity pattern, if a search was requested
    pub fn pattern(&self) -> Option<Pattern> {
        self.include
            .as_deref()
            .map(|include| Pattern::from_list(include, self.match_mode()))
    }

    /// Returns the options passed to every key generation
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            include_info: self.all,
            custom_mnemonic: self.custom_mnemonic.clone(),
            custom_path: self.custom_path.clone(),
            custom_private_key: self.custom_private.clone(),
            derivation: self.derivation,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(network: Network) -> Config {
        Config {
            network,
            all: false,
            include: None,
            prefix: false,
            postfix: false,
            custom_mnemonic: None,
            custom_path: None,
            custom_private: None,
            derivation: None,
            workers: None,
            report_interval: 5,
        }
    }

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("chain_vanity").chain(args.iter().copied()))
    }

    #[test]
    fn test_selector_anywhere() {
        let config = parse(&["-a", "--include", "ab,cd", "ETH", "--prefix"]).unwrap();
        assert_eq!(config.network, Network::Ethereum);
        assert!(config.all);
        assert_eq!(config.match_mode(), MatchMode::Prefix);
        assert_eq!(config.pattern().unwrap().words(), &["ab", "cd"]);

        let config = parse(&["btct"]).unwrap();
        assert_eq!(config.network, Network::BitcoinTaproot);
        assert!(config.pattern().is_none());
    }

    #[test]
    fn test_unknown_selector() {
        assert!(parse(&["doge"]).is_err());
        assert!(parse(&["-a"]).is_err());
    }

    #[test]
    fn test_prefix_postfix_conflict() {
        assert!(parse(&["eth", "-i", "ab", "--prefix", "--postfix"]).is_err());
        let config = parse(&["eth", "-i", "ab", "--postfix"]).unwrap();
        assert_eq!(config.match_mode(), MatchMode::Postfix);
    }

    #[test]
    fn test_custom_options() {
        let config = parse(&[
            "sol",
            "--custom_mnemonic",
            "abandon about",
            "--custom_path",
            "m/44'/501'/0'/0'",
            "--derivation",
            "ed25519-tree",
            "-m",
        ])
        .unwrap();
        let options = config.generate_options();
        assert!(options.include_info);
        assert_eq!(options.custom_mnemonic.as_deref(), Some("abandon about"));
        assert_eq!(options.custom_path.as_deref(), Some("m/44'/501'/0'/0'"));
        assert_eq!(options.derivation, Some(DerivationStrategy::Ed25519Tree));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_include_word() {
        let mut config = make_test_config(Network::BitcoinNative);
        config.include = Some("abc,,def".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern(_))));

        config.include = Some(String::new());
        assert!(config.validate().is_err());

        config.include = Some("abc,def".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_private_key_conflicts() {
        let mut config = make_test_config(Network::Ethereum);
        config.custom_private = Some("46".repeat(32));
        config.all = true;
        assert!(config.validate().is_ok());

        config.custom_path = Some("m/44'/60'/0'/0/0".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConflictingOptions(_))
        ));
    }

    #[test]
    fn test_mnemonic_search_conflict() {
        let config = parse(&[
            "btc",
            "-i",
            "1",
            "--prefix",
            "--custom_mnemonic",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "-w",
            "1",
        ])
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConflictingOptions(_))
        ));

        // A custom path alone still searches over fresh mnemonics
        let config = parse(&["btc", "-i", "1", "--custom_path", "m/84'/0'/0'/0/0"]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_worker_count() {
        let mut config = make_test_config(Network::Ethereum);
        assert!(config.worker_count() >= 1);
        config.workers = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkerCount)));
        config.workers = Some(3);
        assert_eq!(config.worker_count(), 3);
    }
}
