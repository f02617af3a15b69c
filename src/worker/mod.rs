//! Vanity search over freshly generated key pairs.
//!
//! This module provides:
//! - A single-threaded search loop
//! - A multi-threaded worker pool with one aggregating consumer
//! - Shared match accounting and progress statistics

mod cpu;
mod pool;
mod search;

pub use cpu::{CpuWorker, WorkerStats};
pub use pool::WorkerPool;
pub use search::VanitySearcher;

use crate::keygen::KeyPair;
use crate::matcher::MatchMode;

/// A search stops once more than this many matches were reported.
pub const MATCH_LIMIT: u64 = 10;

/// A candidate whose address contains at least one target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityResult {
    /// The matching key pair
    pub keypair: KeyPair,
    /// Every target word found in the address, in list order
    pub words: Vec<String>,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

impl VanityResult {
    /// Returns the report for this candidate: one header per matched word,
    /// each followed by the key pair lines.
    pub fn report(&self, mode: MatchMode) -> Vec<String> {
        let mut lines = Vec::new();
        for word in &self.words {
            lines.push(match_header(word, mode));
            lines.extend(self.keypair.lines());
        }
        lines
    }
}

/// Formats the line announcing a match of `word`.
pub fn match_header(word: &str, mode: MatchMode) -> String {
    let location = match mode {
        MatchMode::Prefix => "prefix ",
        MatchMode::Postfix => "postfix ",
        MatchMode::Substring => "",
    };
    format!("{:>25} included in {}public key below", format!("{:?}", word), location)
}

/// Counts reported matches against a limit.
///
/// Every matched word counts once. The limit is checked after a whole
/// candidate has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCounter {
    count: u64,
    limit: u64,
}

impl MatchCounter {
    pub fn new(limit: u64) -> Self {
        Self { count: 0, limit }
    }

    /// Records a candidate with `words` matches. Returns true once the
    /// count exceeds the limit.
    pub fn record(&mut self, words: usize) -> bool {
        self.count += words as u64;
        self.is_exhausted()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_exhausted(&self) -> bool {
        self.count > self.limit
    }
}

impl Default for MatchCounter {
    fn default() -> Self {
        Self::new(MATCH_LIMIT)
    }
}

/// Outcome of a finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Candidates generated and tested
    pub candidates: u64,
    /// Matches reported
    pub matches: u64,
    /// True if the stop flag ended the search before the match limit
    pub interrupted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{generate_keys, GenerateOptions};
    use crate::network::Network;

    #[test]
    fn test_match_header() {
        assert_eq!(
            match_header("ab", MatchMode::Prefix),
            "                     \"ab\" included in prefix public key below"
        );
        assert_eq!(
            match_header("beef", MatchMode::Postfix),
            "                   \"beef\" included in postfix public key below"
        );
        assert!(match_header("x", MatchMode::Substring).ends_with("\"x\" included in public key below"));
        assert_eq!(match_header("x", MatchMode::Substring).find('"'), Some(22));
    }

    #[test]
    fn test_counter_limit() {
        let mut counter = MatchCounter::default();
        for _ in 0..10 {
            assert!(!counter.record(1));
        }
        assert_eq!(counter.count(), 10);
        assert!(counter.record(1));
        assert!(counter.is_exhausted());

        let mut counter = MatchCounter::new(10);
        assert!(!counter.record(9));
        assert!(counter.record(3));
        assert_eq!(counter.count(), 12);
    }

    #[test]
    fn test_report_repeats_keypair_per_word() {
        let keypair = generate_keys(Network::Ethereum, &GenerateOptions::default()).unwrap();
        let result = VanityResult {
            keypair: keypair.clone(),
            words: vec!["0".to_string(), "x".to_string()],
            worker_id: 0,
        };
        let report = result.report(MatchMode::Substring);
        assert_eq!(report.len(), 6);
        assert!(report[0].ends_with("\"0\" included in public key below"));
        assert_eq!(report[1], keypair.lines()[0]);
        assert!(report[3].ends_with("\"x\" included in public key below"));
    }
}
