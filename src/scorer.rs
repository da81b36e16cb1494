//! Plausibility scoring and entropy analysis for decrypted candidates

use crate::tables::ScoringTables;
use ahash::AHashMap;

/// Score components for one decrypted text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScore {
    /// Combined plausibility score
    pub score: f64,
    /// Shannon entropy in bits
    pub entropy: f64,
}

/// Rates decrypted texts for linguistic plausibility.
///
/// The score is a pure function of the plaintext and the tables: dictionary
/// substring hits, closeness of the letter distribution to the reference
/// profile, and a penalty for repeated-character runs.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    tables: ScoringTables,
}

impl CandidateScorer {
    pub fn new(tables: ScoringTables) -> Self {
        Self { tables }
    }

    /// Combined plausibility score and Shannon entropy.
    ///
    /// Empty input is defined as score 0.0 / entropy 0.0 rather than
    /// propagating a division by zero.
    pub fn score(&self, plaintext: &str) -> TextScore {
        if plaintext.is_empty() {
            return TextScore {
                score: 0.0,
                entropy: 0.0,
            };
        }

        let upper = plaintext.to_uppercase();
        let score = self.word_score(&upper) + 0.8 * self.frequency_score(&upper)
            + self.structure_score(plaintext);

        TextScore {
            score,
            entropy: shannon_entropy(plaintext),
        }
    }

    /// Whether a score clears the acceptance threshold
    pub fn accepts(&self, score: f64) -> bool {
        score > self.tables.threshold
    }

    /// 100 points per dictionary word present as a substring; repeated
    /// occurrences of one word still count once
    fn word_score(&self, upper: &str) -> f64 {
        let hits = self
            .tables
            .dictionary
            .iter()
            .filter(|word| upper.contains(word.as_str()))
            .count();
        hits as f64 * 100.0
    }

    /// Closeness of the letter distribution to the reference profile:
    /// each tracked character contributes max(0, 100 - |actual - expected|)
    /// where both sides are percentages
    fn frequency_score(&self, upper: &str) -> f64 {
        let mut histogram = [0u32; 128];
        let mut total = 0u64;
        for c in upper.chars() {
            total += 1;
            let idx = c as usize;
            if idx < 128 {
                histogram[idx] += 1;
            }
        }
        if total == 0 {
            return 0.0;
        }

        let mut sum = 0.0;
        for &(ch, expected) in &self.tables.frequencies {
            let idx = ch as usize;
            let occurrences = if idx < 128 { histogram[idx] } else { 0 };
            let actual = occurrences as f64 / total as f64 * 100.0;
            sum += (100.0 - (actual - expected).abs()).max(0.0);
        }
        sum
    }

    /// -20 per maximal run of three or more identical consecutive characters
    fn structure_score(&self, plaintext: &str) -> f64 {
        let mut runs = 0u32;
        let mut previous: Option<char> = None;
        let mut run_length = 0u32;

        for c in plaintext.chars() {
            if previous == Some(c) {
                run_length += 1;
            } else {
                if run_length >= 3 {
                    runs += 1;
                }
                previous = Some(c);
                run_length = 1;
            }
        }
        if run_length >= 3 {
            runs += 1;
        }

        runs as f64 * -20.0
    }
}

/// Shannon entropy in bits over the character distribution of `text`:
/// -sum(p * log2(p)) per distinct character. Returns 0.0 for empty input;
/// bounded above by log2 of the distinct-symbol count.
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut counts: AHashMap<char, u32> = AHashMap::new();
    let mut total = 0u32;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ScoringTables;

    fn word_only_tables(words: &[&str]) -> ScoringTables {
        ScoringTables {
            frequencies: Vec::new(),
            dictionary: words.iter().map(|w| w.to_string()).collect(),
            threshold: 65.0,
        }
    }

    #[test]
    fn test_word_score_strictly_increasing() {
        let scorer = CandidateScorer::new(word_only_tables(&["THE", "AND", "CLOCK"]));

        let none = scorer.score("XQZJVW").score;
        let one = scorer.score("XQTHEJVW").score;
        let two = scorer.score("XQTHEANDW").score;
        let three = scorer.score("THEANDCLOCK").score;

        assert_eq!(none, 0.0);
        assert_eq!(one, 100.0);
        assert_eq!(two, 200.0);
        assert_eq!(three, 300.0);
    }

    #[test]
    fn test_repeated_word_counts_once() {
        let scorer = CandidateScorer::new(word_only_tables(&["THE"]));
        assert_eq!(scorer.score("THETHETHE").score, 100.0);
    }

    #[test]
    fn test_word_match_is_substring_containment() {
        let scorer = CandidateScorer::new(word_only_tables(&["EAST"]));
        // No word boundaries: "NORTHEASTERN" contains "EAST"
        assert_eq!(scorer.score("NORTHQWZRN").score, 0.0);
        assert_eq!(scorer.score("QNORTHEASTERNZ").score, 100.0);
    }

    #[test]
    fn test_structure_penalty() {
        let scorer = CandidateScorer::new(word_only_tables(&[]));

        assert_eq!(scorer.score("ABAB").score, 0.0);
        // One maximal run, regardless of its length
        assert_eq!(scorer.score("BAAAB").score, -20.0);
        assert_eq!(scorer.score("BAAAAAB").score, -20.0);
        // Two separate runs
        assert_eq!(scorer.score("AAABBB").score, -40.0);
    }

    #[test]
    fn test_frequency_score_single_tracked_char() {
        let tables = ScoringTables {
            frequencies: vec![('E', 12.5)],
            dictionary: Vec::new(),
            threshold: 65.0,
        };
        let scorer = CandidateScorer::new(tables);

        // "EQZW": actual E frequency 25%, |25 - 12.5| = 12.5
        let expected = 0.8 * (100.0 - 12.5);
        assert!((scorer.score("EQZW").score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_is_defined() {
        let scorer = CandidateScorer::new(ScoringTables::default());
        let result = scorer.score("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.entropy, 0.0);
    }

    #[test]
    fn test_acceptance_is_strict() {
        let scorer = CandidateScorer::new(ScoringTables::default());
        assert!(!scorer.accepts(65.0));
        assert!(scorer.accepts(65.01));
    }

    #[test]
    fn test_entropy_uniform_text_is_zero() {
        assert_eq!(shannon_entropy("AAAAAAAA"), 0.0);
    }

    #[test]
    fn test_entropy_all_distinct_letters() {
        let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let entropy = shannon_entropy(text);
        assert!((entropy - 26f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_bounds() {
        for text in ["KRYPTOS", "OBKRUOXOGH", "AABBAABB", "Z"] {
            let entropy = shannon_entropy(text);
            assert!(entropy >= 0.0);
            assert!(entropy <= 26f64.log2() + 1e-9);
        }
    }

    #[test]
    fn test_score_is_pure() {
        let scorer = CandidateScorer::new(ScoringTables::default());
        let a = scorer.score("OBKRUOXOGHULBSOLIFBBWFLRVQQPRNGKSSO");
        let b = scorer.score("OBKRUOXOGHULBSOLIFBBWFLRVQQPRNGKSSO");
        assert_eq!(a, b);
    }
}
