//! Aggregation of worker reports into a ranked run state

use crate::types::{Candidate, SearchProgress};
use std::cmp::Ordering;

/// How many ranked candidates are exposed for reporting
pub const TOP_CANDIDATES: usize = 50;

/// Aggregator state for one search run.
///
/// Absorbing messages is commutative and associative (sum of processed
/// deltas, union of candidate batches), so correctness does not depend on
/// the order in which worker messages arrive. The state is well-defined as
/// a final result once every chunk has reported completion.
#[derive(Debug, Default)]
pub struct SearchState {
    total_keys: u64,
    keys_processed: u64,
    candidates: Vec<Candidate>,
    ranked: Vec<Candidate>,
}

impl SearchState {
    pub fn new(total_keys: u64) -> Self {
        Self {
            total_keys,
            ..Default::default()
        }
    }

    /// Merge one worker message into the run state
    pub fn absorb(&mut self, message: SearchProgress) {
        match message {
            SearchProgress::Dispatched { total_keys } => {
                self.total_keys = total_keys;
            }
            SearchProgress::KeysProcessed(delta) => {
                self.keys_processed += delta;
            }
            SearchProgress::ChunkCompleted {
                processed,
                candidates,
            } => {
                self.keys_processed += processed;
                self.candidates.extend(candidates);
                self.rerank();
            }
            SearchProgress::ChunkError { worker, message } => {
                eprintln!("[WARN] Worker {} reported an error: {}", worker, message);
            }
        }
    }

    /// Current top-ranked candidates, truncated to `TOP_CANDIDATES`.
    /// The full collection is retained; see `candidate_count`.
    pub fn ranking(&self) -> &[Candidate] {
        &self.ranked
    }

    pub fn keys_processed(&self) -> u64 {
        self.keys_processed
    }

    pub fn total_keys(&self) -> u64 {
        self.total_keys
    }

    /// Size of the full accumulated collection, including candidates
    /// outside the ranked view
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Progress percentage, recomputed from the current totals
    pub fn percent_complete(&self) -> f64 {
        if self.total_keys == 0 {
            0.0
        } else {
            self.keys_processed as f64 / self.total_keys as f64 * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.keys_processed >= self.total_keys
    }

    /// Consume the state, returning the full candidate collection ranked
    pub fn into_ranked(mut self) -> Vec<Candidate> {
        rank(&mut self.candidates);
        self.candidates
    }

    fn rerank(&mut self) {
        let mut ranked = self.candidates.clone();
        rank(&mut ranked);
        ranked.truncate(TOP_CANDIDATES);
        self.ranked = ranked;
    }
}

/// Sort by score descending; ties broken by entropy ascending, preferring
/// the more structured (less random-looking) text
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entropy.partial_cmp(&b.entropy).unwrap_or(Ordering::Equal))
    });
}
