//! Single-threaded vanity search loop.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;
use crate::keygen::{generate_keys, GenerateOptions};
use crate::matcher::Pattern;
use crate::network::Network;

use super::{MatchCounter, SearchSummary, VanityResult, MATCH_LIMIT};

/// Generates key pairs on the calling thread until enough matches were
/// reported or the stop flag is raised.
#[derive(Debug, Clone)]
pub struct VanitySearcher {
    network: Network,
    options: GenerateOptions,
    pattern: Pattern,
    limit: u64,
}

impl VanitySearcher {
    pub fn new(network: Network, options: GenerateOptions, pattern: Pattern) -> Self {
        Self {
            network,
            options,
            pattern,
            limit: MATCH_LIMIT,
        }
    }

    /// Overrides the match limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Runs the search, calling `on_match` for every matching candidate.
    ///
    /// Each iteration draws fresh randomness. A generation error ends the
    /// search and is returned as is.
    pub fn search<F>(&self, stop: &AtomicBool, mut on_match: F) -> Result<SearchSummary>
    where
        F: FnMut(&VanityResult),
    {
        let mut counter = MatchCounter::new(self.limit);
        let mut candidates = 0u64;

        while !stop.load(Ordering::Relaxed) {
            let keypair = generate_keys(self.network, &self.options)?;
            candidates += 1;

            let words: Vec<String> = self
                .pattern
                .matches(keypair.public())
                .into_iter()
                .map(str::to_string)
                .collect();
            if words.is_empty() {
                continue;
            }

            let exhausted = counter.record(words.len());
            on_match(&VanityResult {
                keypair,
                words,
                worker_id: 0,
            });
            if exhausted {
                return Ok(SearchSummary {
                    candidates,
                    matches: counter.count(),
                    interrupted: false,
                });
            }
        }

        Ok(SearchSummary {
            candidates,
            matches: counter.count(),
            interrupted: true,
        })
    }
}
