use std::sync::atomic::AtomicBool;

use clap::Parser;

use chain_vanity::{generate_keys, Config, KeygenError, MatchMode, VanitySearcher};

const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn config(args: &[&str]) -> Config {
    let config = Config::try_parse_from(std::iter::once("chain_vanity").chain(args.iter().copied()))
        .unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn mnemonic_to_native_segwit_lines() {
    let config = config(&["native", "--all", "--custom_mnemonic", ABANDON]);
    let keypair = generate_keys(config.network, &config.generate_options()).unwrap();

    assert_eq!(
        keypair.to_string(),
        format!(
            "bitcoin native public       bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu\n\
             bitcoin native private      KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d\n\
             bitcoin native mnemonic     {}\n\
             bitcoin native derivation   m/84'/0'/0'/0/0\n",
            ABANDON
        )
    );
}

#[test]
fn imported_key_without_all_prints_two_lines() {
    let config = config(&[
        "--custom_private",
        "0x0000000000000000000000000000000000000000000000000000000000000001",
        "eth",
    ]);
    let keypair = generate_keys(config.network, &config.generate_options()).unwrap();

    assert_eq!(keypair.public(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    assert_eq!(
        keypair.private(),
        "0000000000000000000000000000000000000000000000000000000000000001"
    );
    assert_eq!(keypair.lines().len(), 2);
}

#[test]
fn malformed_path_fails_without_output() {
    let config = config(&["btc", "--custom_path", "44'/0'/0'"]);
    let result = generate_keys(config.network, &config.generate_options());

    let err = result.unwrap_err();
    assert!(matches!(err, KeygenError::InvalidPathFormat(_)));
    assert!(format!("{} {}", config.network, err).starts_with("bitcoin legacy invalid derivation path"));
}

#[test]
fn prefix_search_from_command_line() {
    let config = config(&["taproot", "-i", "xyz,BC1P", "--prefix", "-w", "1"]);
    let pattern = config.pattern().unwrap();
    assert_eq!(pattern.mode(), MatchMode::Prefix);

    let searcher = VanitySearcher::new(config.network, config.generate_options(), pattern);
    let mut seen = 0;
    let summary = searcher
        .search(&AtomicBool::new(false), |result| {
            assert_eq!(result.words, vec!["BC1P".to_string()]);
            assert!(result.report(MatchMode::Prefix)[0].contains("\"BC1P\" included in prefix"));
            seen += 1;
        })
        .unwrap();

    assert_eq!(seen, 11);
    assert_eq!(summary.matches, 11);
}

#[test]
fn search_draws_a_fresh_mnemonic_per_candidate() {
    let parsed = Config::try_parse_from([
        "chain_vanity",
        "btc",
        "-i",
        "1",
        "--prefix",
        "--custom_mnemonic",
        ABANDON,
    ])
    .unwrap();
    assert!(parsed.validate().is_err());

    let config = config(&["btc", "-i", "1", "--prefix", "--custom_path", "m/44'/0'/0'/0/0", "-w", "1"]);
    let searcher = VanitySearcher::new(
        config.network,
        config.generate_options(),
        config.pattern().unwrap(),
    );

    let mut addresses = std::collections::HashSet::new();
    let mut mnemonics = std::collections::HashSet::new();
    searcher
        .search(&AtomicBool::new(false), |result| {
            addresses.insert(result.keypair.public().to_string());
            mnemonics.insert(result.keypair.mnemonic().unwrap().to_string());
        })
        .unwrap();

    assert_eq!(addresses.len(), 11);
    assert_eq!(mnemonics.len(), 11);
}
