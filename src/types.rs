use crate::error::SearchError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Decryption transform selector (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMethod {
    /// Vigenère-style shift over the keyed tableau alphabet
    ShiftSubstitution,
    /// Columnar transposition with key-sorted column order
    ColumnarTransposition,
}

impl CipherMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CipherMethod::ShiftSubstitution => "shift",
            CipherMethod::ColumnarTransposition => "transposition",
        }
    }
}

impl fmt::Display for CipherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shift" | "shift-substitution" | "vigenere" => Ok(CipherMethod::ShiftSubstitution),
            "transposition" | "columnar" | "columnar-transposition" => {
                Ok(CipherMethod::ColumnarTransposition)
            }
            other => Err(SearchError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// A decryption attempt that cleared the acceptance threshold.
///
/// Immutable once created; ownership passes to the aggregator when the
/// worker's chunk report is transmitted.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// The key variant that produced this plaintext
    pub key: String,
    /// The decrypted text
    pub plaintext: String,
    /// Combined plausibility score
    pub score: f64,
    /// Shannon entropy of the plaintext in bits
    pub entropy: f64,
}

/// Progress message streamed from workers via tokio channel.
///
/// Processed counts are deltas since the previous message from the same
/// worker, so the aggregator's merge is a plain sum regardless of how
/// messages from different workers interleave.
#[derive(Debug, Clone)]
pub enum SearchProgress {
    /// Sent once at dispatch: the size of the generated key space
    Dispatched { total_keys: u64 },
    /// Keys processed since the last message (interim, no candidates)
    KeysProcessed(u64),
    /// Chunk finished: remaining processed delta plus accepted candidates
    ChunkCompleted {
        processed: u64,
        candidates: Vec<Candidate>,
    },
    /// Error in a chunk (non-fatal)
    ChunkError { worker: usize, message: String },
}

/// One search request as dispatched to the coordinator
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Normalized ciphertext (uppercase letters only)
    pub ciphertext: String,
    /// Transform to apply to every key
    pub method: CipherMethod,
    /// Seed words to expand into the key space
    pub seeds: Vec<String>,
    /// Largest derived key length to test
    pub max_key_length: usize,
    /// Requested worker pool size (clamped by the coordinator)
    pub workers: usize,
}

/// Result of a completed search run
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Every accepted candidate, ranked by score desc then entropy asc
    pub ranked: Vec<Candidate>,
    /// Keys accounted for by worker reports
    pub keys_processed: u64,
    /// Size of the generated key space
    pub total_keys: u64,
    /// Wall-clock duration of the run
    pub duration_secs: f64,
}
