//! Rendering of a completed run for the caller

use crate::error::Result;
use crate::types::{Candidate, SearchOutcome, SearchRequest};
use serde::Serialize;

/// Serializable summary of a completed run
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub method: &'a str,
    pub ciphertext: &'a str,
    pub total_keys: u64,
    pub keys_processed: u64,
    pub duration_secs: f64,
    pub candidates: &'a [Candidate],
}

impl<'a> SearchReport<'a> {
    pub fn new(request: &'a SearchRequest, outcome: &'a SearchOutcome, limit: usize) -> Self {
        Self {
            method: request.method.name(),
            ciphertext: &request.ciphertext,
            total_keys: outcome.total_keys,
            keys_processed: outcome.keys_processed,
            duration_secs: outcome.duration_secs,
            candidates: &outcome.ranked[..outcome.ranked.len().min(limit)],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fixed-width table of the top candidates, plaintext clipped for display
pub fn render_table(candidates: &[Candidate], limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<16} {:>8} {:>8}  {}\n",
        "#", "KEY", "SCORE", "ENTROPY", "PLAINTEXT"
    ));

    for (i, candidate) in candidates.iter().take(limit).enumerate() {
        let preview: String = candidate.plaintext.chars().take(48).collect();
        out.push_str(&format!(
            "{:<4} {:<16} {:>8.1} {:>8.3}  {}\n",
            i + 1,
            candidate.key,
            candidate.score,
            candidate.entropy,
            preview
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CipherMethod;

    fn sample_outcome() -> SearchOutcome {
        SearchOutcome {
            ranked: vec![
                Candidate {
                    key: "BERLIN".to_string(),
                    plaintext: "EASTNORTHEAST".to_string(),
                    score: 320.5,
                    entropy: 3.2,
                },
                Candidate {
                    key: "CLOCK".to_string(),
                    plaintext: "XQZWKVJQXZW".to_string(),
                    score: 78.0,
                    entropy: 4.1,
                },
            ],
            keys_processed: 200,
            total_keys: 200,
            duration_secs: 0.42,
        }
    }

    fn sample_request() -> SearchRequest {
        SearchRequest {
            ciphertext: "OBKR".to_string(),
            method: CipherMethod::ShiftSubstitution,
            seeds: vec!["BERLIN".to_string()],
            max_key_length: 6,
            workers: 2,
        }
    }

    #[test]
    fn test_table_lists_candidates_in_order() {
        let outcome = sample_outcome();
        let table = render_table(&outcome.ranked, 50);

        let berlin = table.find("BERLIN").unwrap();
        let clock = table.find("CLOCK").unwrap();
        assert!(berlin < clock);
        assert!(table.contains("EASTNORTHEAST"));
    }

    #[test]
    fn test_table_respects_limit() {
        let outcome = sample_outcome();
        let table = render_table(&outcome.ranked, 1);
        assert!(table.contains("BERLIN"));
        assert!(!table.contains("CLOCK"));
    }

    #[test]
    fn test_json_report_shape() {
        let request = sample_request();
        let outcome = sample_outcome();
        let report = SearchReport::new(&request, &outcome, 50);
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["method"], "shift");
        assert_eq!(value["total_keys"], 200);
        assert_eq!(value["candidates"][0]["key"], "BERLIN");
        assert_eq!(value["candidates"][0]["score"], 320.5);
    }

    #[test]
    fn test_json_report_truncates() {
        let request = sample_request();
        let outcome = sample_outcome();
        let report = SearchReport::new(&request, &outcome, 1);
        assert_eq!(report.candidates.len(), 1);
    }
}
