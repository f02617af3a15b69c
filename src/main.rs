//! Multi-network key generator CLI
//!
//! Usage:
//!   chain_vanity eth                       # One Ethereum key pair
//!   chain_vanity btcn -a                   # Native SegWit key with mnemonic and path
//!   chain_vanity sol -i abc,xyz --prefix   # Solana addresses starting with abc or xyz

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use chain_vanity::{
    generate_keys, Config, GenerateOptions, MatchMode, Network, Pattern, SearchSummary,
    VanityResult, VanitySearcher, WorkerPool,
};

fn main() {
    let config = Config::parse();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    let network = config.network;
    let options = config.generate_options();

    let pattern = match config.pattern() {
        Some(pattern) => pattern,
        None => match generate_keys(network, &options) {
            Ok(keypair) => {
                print!("{}", keypair);
                return;
            }
            Err(e) => {
                eprintln!("{} {}", network, e);
                process::exit(1);
            }
        },
    };

    println!(
        "Generating {} keys that includes {:?}",
        network,
        pattern.words()
    );
    eprintln!(
        "Mode: {}, difficulty: {}, workers: {}",
        pattern.mode(),
        pattern.difficulty_description(network.address_alphabet()),
        config.worker_count()
    );

    let outcome = if config.worker_count() == 1 {
        search_single(network, options, pattern)
    } else {
        search_parallel(&config, network, options, pattern)
    };

    match outcome {
        Ok(summary) => {
            if summary.interrupted {
                eprintln!("Stopped by user.");
            }
            eprintln!(
                "Generated {} keys, {} matches",
                format_number(summary.candidates),
                summary.matches
            );
        }
        Err(e) => {
            eprintln!("{} {}", network, e);
            process::exit(1);
        }
    }
}

fn search_single(
    network: Network,
    options: GenerateOptions,
    pattern: Pattern,
) -> chain_vanity::Result<SearchSummary> {
    let mode = pattern.mode();
    let stop_flag = Arc::new(AtomicBool::new(false));
    ctrlc_handler(stop_flag.clone());

    VanitySearcher::new(network, options, pattern)
        .search(&stop_flag, |result| print_result(result, mode))
}

fn search_parallel(
    config: &Config,
    network: Network,
    options: GenerateOptions,
    pattern: Pattern,
) -> chain_vanity::Result<SearchSummary> {
    let mode = pattern.mode();
    let pool = WorkerPool::new(config.worker_count(), network, options, pattern);

    // Set up ctrl-c handler
    ctrlc_handler(pool.stop_flag_clone());

    let report = config.report_interval > 0;
    let tick = Duration::from_secs(config.report_interval.max(1));

    let summary = pool.consume(
        tick,
        |result| print_result(result, mode),
        |pool| {
            if report {
                print_progress(pool);
            }
        },
    )?;

    eprintln!(
        "Time elapsed: {:.2}s, average speed: {}/s",
        pool.elapsed().as_secs_f64(),
        format_number(pool.keys_per_second() as u64)
    );

    pool.join();
    Ok(summary)
}

fn print_result(result: &VanityResult, mode: MatchMode) {
    for line in result.report(mode) {
        println!("{}", line);
    }
}

fn print_progress(pool: &WorkerPool) {
    let keys = pool.total_keys();
    let rate = pool.keys_per_second();
    let elapsed = pool.elapsed().as_secs();

    eprintln!(
        "[{:>4}s] Generated {} keys ({}/s)",
        elapsed,
        format_number(keys),
        format_number(rate as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    })
    .expect("Error setting Ctrl-C handler");
}
