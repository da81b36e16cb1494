//! Candidate key generation from seed words

use crate::error::{Result, SearchError};
use ahash::AHashSet;

/// Expands seed words into the flat list of key variants to test.
///
/// Each seed contributes, for every length from 1 to the maximum: a tiled
/// variant of exactly that length, plus the upper- and lower-case forms of
/// the truncated base. Variants are deduplicated within one seed's output
/// only; identical strings derived from different seeds are all kept so
/// each seed's family is tested in full.
#[derive(Debug, Clone)]
pub struct KeySpaceGenerator {
    max_length: usize,
}

impl KeySpaceGenerator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Expand every seed and concatenate the per-seed variant lists,
    /// in seed order then length order.
    pub fn generate(&self, seeds: &[String]) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for seed in seeds {
            keys.extend(self.expand_seed(seed)?);
        }
        Ok(keys)
    }

    /// Variants for a single seed, first occurrence kept
    pub fn expand_seed(&self, seed: &str) -> Result<Vec<String>> {
        if seed.is_empty() {
            return Err(SearchError::InvalidSeed(
                "seed key must not be empty".to_string(),
            ));
        }

        let chars: Vec<char> = seed.chars().collect();
        let mut seen = AHashSet::new();
        let mut variants = Vec::new();

        for len in 1..=self.max_length {
            let base: String = chars.iter().take(len).collect();
            // Tile the base end-to-end and truncate to exactly `len` chars
            let tiled: String = base.chars().cycle().take(len).collect();

            for form in [tiled, base.to_uppercase(), base.to_lowercase()] {
                if seen.insert(form.clone()) {
                    variants.push(form);
                }
            }
        }

        Ok(variants)
    }
}
