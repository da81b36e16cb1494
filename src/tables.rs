//! Shared reference tables: the keyed tableau, the K4 passage, seed words,
//! and the scoring configuration threaded into the scorer at construction.

use lazy_static::lazy_static;

/// The Kryptos sculpture's keyed tableau ordering. A permutation of A-Z,
/// not the natural alphabetic order.
pub const KRYPTOS_ALPHABET: &str = "KRYPTOSABCDEFGHIJLMNQUVWXZ";

/// The unsolved 97-letter K4 passage
pub const K4_CIPHERTEXT: &str =
    "OBKRUOXOGHULBSOLIFBBWFLRVQQPRNGKSSOTWTQSJQSSEKZZWATJKLUDIAWINFBNYPVTTMZFPKWGDKZXTJCDIGKUHUAUEKCAR";

/// Seed words historically associated with the sculpture: the K1-K3 keys,
/// the revealed clue words, and names connected to the installation.
pub const DEFAULT_SEED_KEYS: &[&str] = &[
    "KRYPTOS",
    "PALIMPSEST",
    "ABSCISSA",
    "BERLIN",
    "CLOCK",
    "NORTHEAST",
    "EAST",
    "SANBORN",
    "SCHEIDT",
    "LANGLEY",
    "SHADOW",
    "UNDERGROUND",
];

/// Expected letter frequencies (percent) in English text
pub const ENGLISH_FREQUENCIES: &[(char, f64)] = &[
    ('E', 12.70),
    ('T', 9.06),
    ('A', 8.17),
    ('O', 7.51),
    ('I', 6.97),
    ('N', 6.75),
    ('S', 6.33),
    ('H', 6.09),
    ('R', 5.99),
    ('D', 4.25),
    ('L', 4.03),
    ('C', 2.78),
    ('U', 2.76),
    ('M', 2.41),
    ('W', 2.36),
    ('F', 2.23),
    ('G', 2.02),
    ('Y', 1.97),
    ('P', 1.93),
    ('B', 1.49),
    ('V', 0.98),
    ('K', 0.77),
    ('J', 0.15),
    ('X', 0.15),
    ('Q', 0.10),
    ('Z', 0.07),
];

/// Common short words plus the known K4 crib words, matched as substrings
pub const COMMON_WORDS: &[&str] = &[
    "THE", "AND", "THAT", "HAVE", "FOR", "NOT", "WITH", "YOU", "THIS", "WAS", "ARE", "HIS", "HER",
    "ONE", "ALL", "OUT", "WHO", "TIME", "EAST", "WEST", "NORTH", "SOUTH", "BERLIN", "CLOCK",
    "SECRET", "AGENT", "LIGHT", "SHADOW",
];

/// Fixed acceptance threshold: candidates scoring above this are recorded
pub const ACCEPTANCE_THRESHOLD: f64 = 65.0;

/// Scoring configuration for one search run.
///
/// Passed into `CandidateScorer` at construction and shared read-only with
/// every worker; never mutated during a run.
#[derive(Debug, Clone)]
pub struct ScoringTables {
    /// Character → expected percentage frequency
    pub frequencies: Vec<(char, f64)>,
    /// Words scored by substring containment
    pub dictionary: Vec<String>,
    /// Acceptance threshold for recording a candidate
    pub threshold: f64,
}

impl Default for ScoringTables {
    fn default() -> Self {
        DEFAULT_TABLES.clone()
    }
}

lazy_static! {
    /// Compiled-in defaults shared by the binary and tests
    pub static ref DEFAULT_TABLES: ScoringTables = ScoringTables {
        frequencies: ENGLISH_FREQUENCIES.to_vec(),
        dictionary: COMMON_WORDS.iter().map(|w| w.to_string()).collect(),
        threshold: ACCEPTANCE_THRESHOLD,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_a_permutation() {
        assert_eq!(KRYPTOS_ALPHABET.len(), 26);
        let mut seen = [false; 26];
        for c in KRYPTOS_ALPHABET.chars() {
            let idx = (c as u8 - b'A') as usize;
            assert!(!seen[idx], "repeated symbol {}", c);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_k4_passage_length() {
        assert_eq!(K4_CIPHERTEXT.len(), 97);
        assert!(K4_CIPHERTEXT.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_frequency_profile_covers_alphabet() {
        assert_eq!(ENGLISH_FREQUENCIES.len(), 26);
        let total: f64 = ENGLISH_FREQUENCIES.iter().map(|(_, p)| p).sum();
        assert!((total - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_default_tables() {
        let tables = ScoringTables::default();
        assert_eq!(tables.threshold, ACCEPTANCE_THRESHOLD);
        assert_eq!(tables.dictionary.len(), COMMON_WORDS.len());
        assert!(tables.dictionary.iter().all(|w| !w.is_empty()));
    }
}
