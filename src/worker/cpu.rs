//! CPU-based worker for vanity search.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::error::Result;
use crate::keygen::{generate_keys, GenerateOptions};
use crate::matcher::Pattern;
use crate::network::Network;

use super::VanityResult;

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total candidates generated
    pub keys_generated: AtomicU64,
    /// Matched words found
    pub matches_found: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total keys generated.
    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// A CPU worker that generates key pairs and tests their addresses.
pub struct CpuWorker {
    id: usize,
    network: Network,
    options: GenerateOptions,
    pattern: Pattern,
    result_tx: Sender<Result<VanityResult>>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        network: Network,
        options: GenerateOptions,
        pattern: Pattern,
        result_tx: Sender<Result<VanityResult>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            network,
            options,
            pattern,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates key pairs and tests them against the pattern until:
    /// - Stop flag is set
    /// - Key generation fails (the error is sent and the worker exits)
    /// - Channel is closed
    ///
    /// The flag is polled between candidates, so a matching candidate is
    /// always sent whole.
    pub fn run(&self) {
        while !self.stop_flag.load(Ordering::Relaxed) {
            let keypair = match generate_keys(self.network, &self.options) {
                Ok(keypair) => keypair,
                Err(e) => {
                    let _ = self.result_tx.send(Err(e));
                    return;
                }
            };
            self.stats.keys_generated.fetch_add(1, Ordering::Relaxed);

            let words: Vec<String> = self
                .pattern
                .matches(keypair.public())
                .into_iter()
                .map(str::to_string)
                .collect();
            if words.is_empty() {
                continue;
            }

            self.stats
                .matches_found
                .fetch_add(words.len() as u64, Ordering::Relaxed);

            let result = VanityResult {
                keypair,
                words,
                worker_id: self.id,
            };
            if self.result_tx.send(Ok(result)).is_err() {
                return;
            }
        }
    }
}
