//! Work distribution across a fixed pool of search workers

use crate::cipher::CipherEngine;
use crate::error::{Result, SearchError};
use crate::keyspace::KeySpaceGenerator;
use crate::scorer::CandidateScorer;
use crate::search::aggregate::SearchState;
use crate::types::{Candidate, CipherMethod, SearchOutcome, SearchProgress, SearchRequest};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::mpsc::Sender;

/// Upper bound on the worker pool, independent of host parallelism
pub const MAX_WORKERS: usize = 16;

/// Keys processed between interim progress messages
pub const PROGRESS_INTERVAL: u64 = 100;

/// Split `n` keys into `workers` contiguous chunks. `workers` must be
/// non-zero.
///
/// The concatenation of the chunks in worker order reproduces the key list
/// exactly once: no gaps, no overlap. Trailing chunks may be smaller or
/// empty when `n` is not a multiple of the chunk size.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk_size = (n + workers - 1) / workers;
    (0..workers)
        .map(|i| {
            let start = (i * chunk_size).min(n);
            let end = ((i + 1) * chunk_size).min(n);
            start..end
        })
        .collect()
}

/// Runs one search request across a fixed pool of workers.
///
/// Each worker is a closed computation over shared read-only data: it
/// receives its chunk, the ciphertext, and the scoring tables at dispatch
/// and communicates only through one-way progress messages, so the search
/// loop needs no locks.
pub struct SearchCoordinator {
    engine: CipherEngine,
    scorer: CandidateScorer,
    in_flight: AtomicBool,
}

impl SearchCoordinator {
    pub fn new(engine: CipherEngine, scorer: CandidateScorer) -> Self {
        Self {
            engine,
            scorer,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Expand the key space, dispatch it across the pool, and aggregate
    /// the results.
    ///
    /// Progress messages stream over `sender` while the run executes; the
    /// returned outcome carries the final merged and ranked state. Starting
    /// a second run on the same coordinator while one is in flight fails
    /// with `SearchError::SearchInProgress`.
    pub fn run(
        &self,
        request: &SearchRequest,
        sender: Option<Sender<SearchProgress>>,
    ) -> Result<SearchOutcome> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SearchError::SearchInProgress);
        }
        let result = self.run_inner(request, sender);
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn run_inner(
        &self,
        request: &SearchRequest,
        sender: Option<Sender<SearchProgress>>,
    ) -> Result<SearchOutcome> {
        if request.workers == 0 {
            return Err(SearchError::Config(
                "worker pool size must be at least 1".to_string(),
            ));
        }
        if request.max_key_length == 0 {
            return Err(SearchError::Config(
                "max key length must be at least 1".to_string(),
            ));
        }
        let workers = request.workers.min(MAX_WORKERS);

        let start_time = Instant::now();
        let generator = KeySpaceGenerator::new(request.max_key_length);
        let keys = generator.generate(&request.seeds)?;
        let total_keys = keys.len() as u64;
        send(sender.as_ref(), SearchProgress::Dispatched { total_keys });

        let chunks = partition(keys.len(), workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build worker pool: {}", e)))?;

        let ciphertext = request.ciphertext.as_str();
        let method = request.method;
        let keys_ref = &keys;
        let sender_ref = sender.as_ref();

        // One chunk per worker, isolated with catch_unwind so a panicking
        // worker still has its keys accounted for
        let chunk_reports: Vec<(u64, Vec<Candidate>)> = pool.install(|| {
            chunks
                .par_iter()
                .enumerate()
                .map(|(worker, range)| {
                    let chunk_len = range.len() as u64;
                    let reported = AtomicU64::new(0);

                    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        self.scan_chunk(
                            &keys_ref[range.clone()],
                            ciphertext,
                            method,
                            sender_ref,
                            &reported,
                        )
                    }));

                    let remainder = chunk_len - reported.load(Ordering::SeqCst);
                    match outcome {
                        Ok(candidates) => {
                            send(
                                sender_ref,
                                SearchProgress::ChunkCompleted {
                                    processed: remainder,
                                    candidates: candidates.clone(),
                                },
                            );
                            (chunk_len, candidates)
                        }
                        Err(_) => {
                            eprintln!(
                                "[WARN] Worker {} panicked, counting {} keys as processed",
                                worker, chunk_len
                            );
                            send(
                                sender_ref,
                                SearchProgress::ChunkError {
                                    worker,
                                    message: "Panic in chunk processing".to_string(),
                                },
                            );
                            send(
                                sender_ref,
                                SearchProgress::ChunkCompleted {
                                    processed: remainder,
                                    candidates: Vec::new(),
                                },
                            );
                            (chunk_len, Vec::new())
                        }
                    }
                })
                .collect()
        });

        // Fold chunk reports through the same commutative merge the live
        // aggregator uses
        let mut state = SearchState::new(total_keys);
        for (processed, candidates) in chunk_reports {
            state.absorb(SearchProgress::ChunkCompleted {
                processed,
                candidates,
            });
        }

        let keys_processed = state.keys_processed();
        Ok(SearchOutcome {
            ranked: state.into_ranked(),
            keys_processed,
            total_keys,
            duration_secs: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Process one contiguous chunk of keys; returns accepted candidates.
    ///
    /// Interim progress goes out every `PROGRESS_INTERVAL` keys; `reported`
    /// tracks how many of the chunk's keys have already been accounted for
    /// so the completion message carries the exact remainder. Per-key
    /// failures are counted as processed with no candidate.
    fn scan_chunk(
        &self,
        keys: &[String],
        ciphertext: &str,
        method: CipherMethod,
        sender: Option<&Sender<SearchProgress>>,
        reported: &AtomicU64,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut since_report = 0u64;

        for key in keys {
            match self.engine.decrypt(ciphertext, key, method) {
                Ok(plaintext) => {
                    let text_score = self.scorer.score(&plaintext);
                    if self.scorer.accepts(text_score.score) {
                        candidates.push(Candidate {
                            key: key.clone(),
                            plaintext,
                            score: text_score.score,
                            entropy: text_score.entropy,
                        });
                    }
                }
                Err(e) => {
                    eprintln!("[WARN] Key '{}' failed to decrypt, skipping: {}", key, e);
                }
            }

            since_report += 1;
            if since_report == PROGRESS_INTERVAL {
                reported.fetch_add(since_report, Ordering::SeqCst);
                send(sender, SearchProgress::KeysProcessed(since_report));
                since_report = 0;
            }
        }

        candidates
    }
}

/// Fire-and-forget send; the message is dropped if the receiver is gone
fn send(sender: Option<&Sender<SearchProgress>>, message: SearchProgress) {
    if let Some(s) = sender {
        if !s.is_closed() {
            let _ = s.blocking_send(message);
        }
    }
}
