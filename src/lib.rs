//! Parallel key search for the unsolved Kryptos K4 passage
//!
//! This library provides the brute-force search core:
//! - Key-space expansion from a small list of seed words
//! - Two decryption transforms over the keyed Kryptos tableau
//!   (Vigenère-family shift substitution and columnar transposition)
//! - Linguistic plausibility scoring with Shannon entropy analysis
//! - Chunked work distribution across a fixed rayon worker pool
//! - Progress streaming via tokio::sync::mpsc
//! - Panic isolation with catch_unwind so a failing worker cannot
//!   stall the completion accounting

pub mod cipher;
pub mod cli;
pub mod error;
pub mod keyspace;
pub mod report;
pub mod scorer;
pub mod search;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use cipher::CipherEngine;
pub use error::{Result, SearchError};
pub use keyspace::KeySpaceGenerator;
pub use report::{render_table, SearchReport};
pub use scorer::{shannon_entropy, CandidateScorer, TextScore};
pub use search::{partition, SearchCoordinator, SearchState, MAX_WORKERS, TOP_CANDIDATES};
pub use tables::{
    ScoringTables, ACCEPTANCE_THRESHOLD, DEFAULT_SEED_KEYS, K4_CIPHERTEXT, KRYPTOS_ALPHABET,
};
pub use types::{Candidate, CipherMethod, SearchOutcome, SearchProgress, SearchRequest};
