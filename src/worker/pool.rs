//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::error::Result;
use crate::keygen::GenerateOptions;
use crate::matcher::Pattern;
use crate::network::Network;

use super::cpu::{CpuWorker, WorkerStats};
use super::{MatchCounter, SearchSummary, VanityResult, MATCH_LIMIT};

/// Manages a pool of workers for parallel vanity search.
///
/// Workers only generate and test candidates. The thread driving
/// [`WorkerPool::consume`] is the single consumer: it counts matches and
/// raises the stop flag once the limit is exceeded.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for results
    result_rx: Receiver<Result<VanityResult>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Creates a new worker pool with the specified number of workers.
    pub fn new(
        num_workers: usize,
        network: Network,
        options: GenerateOptions,
        pattern: Pattern,
    ) -> Self {
        let (result_tx, result_rx) = bounded(100);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let handles = Self::spawn_workers(
            num_workers,
            network,
            &options,
            &pattern,
            result_tx,
            stop_flag.clone(),
            stats.clone(),
        );

        Self {
            num_workers,
            handles: Some(handles),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        }
    }

    /// Spawns worker threads. `result_tx` is dropped on return so the
    /// channel disconnects once every worker has exited.
    fn spawn_workers(
        num_workers: usize,
        network: Network,
        options: &GenerateOptions,
        pattern: &Pattern,
        result_tx: Sender<Result<VanityResult>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Vec<JoinHandle<()>> {
        (0..num_workers)
            .map(|id| {
                let worker = CpuWorker::new(
                    id,
                    network,
                    options.clone(),
                    pattern.clone(),
                    result_tx.clone(),
                    stop_flag.clone(),
                    stats.clone(),
                );

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || worker.run())
                    .expect("Failed to spawn worker thread")
            })
            .collect()
    }

    /// Consumes results until more than [`MATCH_LIMIT`] matches were
    /// counted, the stop flag is raised or a worker fails.
    ///
    /// `on_tick` runs once per `tick` of wall-clock time, whether or not
    /// results keep arriving.
    pub fn consume<F, P>(&self, tick: Duration, on_match: F, on_tick: P) -> Result<SearchSummary>
    where
        F: FnMut(&VanityResult),
        P: FnMut(&WorkerPool),
    {
        self.consume_with_limit(MATCH_LIMIT, tick, on_match, on_tick)
    }

    /// Like [`WorkerPool::consume`] with a custom match limit.
    pub fn consume_with_limit<F, P>(
        &self,
        limit: u64,
        tick: Duration,
        mut on_match: F,
        mut on_tick: P,
    ) -> Result<SearchSummary>
    where
        F: FnMut(&VanityResult),
        P: FnMut(&WorkerPool),
    {
        let mut counter = MatchCounter::new(limit);
        let mut last_tick = Instant::now();

        while !self.is_stopped() {
            let wait = tick.saturating_sub(last_tick.elapsed());
            match self.result_rx.recv_timeout(wait) {
                Ok(Ok(result)) => {
                    let exhausted = counter.record(result.words.len());
                    on_match(&result);
                    if exhausted {
                        self.stop();
                        return Ok(self.summary(&counter, false));
                    }
                }
                Ok(Err(e)) => {
                    self.stop();
                    return Err(e);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_tick.elapsed() >= tick {
                on_tick(self);
                last_tick = Instant::now();
            }
        }

        Ok(self.summary(&counter, true))
    }

    fn summary(&self, counter: &MatchCounter, interrupted: bool) -> SearchSummary {
        SearchSummary {
            candidates: self.total_keys(),
            matches: counter.count(),
            interrupted,
        }
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers and waits for them to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            // Unblock workers waiting on a full channel; ends once all
            // senders are gone
            while self.result_rx.recv().is_ok() {}
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the total keys generated across all workers.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Returns the total matched words found by the workers.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
