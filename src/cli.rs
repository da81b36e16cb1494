use crate::error::Result;
use crate::search::MAX_WORKERS;
use crate::tables::{DEFAULT_SEED_KEYS, K4_CIPHERTEXT};
use crate::types::{CipherMethod, SearchRequest};
use clap::Parser;

/// Kryptos K4 key search - parallel brute-force with plausibility scoring
#[derive(Parser, Debug, Clone)]
#[command(name = "k4-search")]
#[command(version = "0.1.0")]
#[command(about = "Parallel key search for the Kryptos K4 passage", long_about = None)]
pub struct Args {
    /// Ciphertext to attack (defaults to the 97-letter K4 passage)
    #[arg(value_name = "CIPHERTEXT")]
    pub ciphertext: Option<String>,

    /// Cipher method: shift | transposition
    #[arg(short = 'm', long = "method", default_value = "shift")]
    pub method: String,

    /// Maximum derived key length
    #[arg(long = "max-key-length", default_value = "12")]
    pub max_key_length: usize,

    /// Worker pool size (0 = auto-detect, capped)
    #[arg(short = 'w', long = "workers", default_value = "0")]
    pub workers: usize,

    /// Additional seed key to expand alongside the built-in list (repeatable)
    #[arg(long = "seed", value_name = "WORD")]
    pub seeds: Vec<String>,

    /// Use only the --seed words, ignoring the built-in list
    #[arg(long = "seeds-only")]
    pub seeds_only: bool,

    /// Emit the final ranking as JSON on stdout
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Validate the arguments
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_key_length == 0 {
            return Err("max-key-length must be greater than 0".to_string());
        }

        if let Err(e) = self.method.parse::<CipherMethod>() {
            return Err(e.to_string());
        }

        if self.seeds_only && self.seeds.is_empty() {
            return Err("--seeds-only requires at least one --seed".to_string());
        }

        if let Some(ciphertext) = &self.ciphertext {
            if normalize_ciphertext(ciphertext).is_empty() {
                return Err("ciphertext contains no letters".to_string());
            }
        }

        Ok(())
    }

    /// Resolve the effective worker pool size
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            num_cpus::get().min(MAX_WORKERS)
        }
    }

    /// Assemble the search request the coordinator consumes
    pub fn to_request(&self) -> Result<SearchRequest> {
        let method = self.method.parse::<CipherMethod>()?;

        let raw = self.ciphertext.as_deref().unwrap_or(K4_CIPHERTEXT);
        let ciphertext = normalize_ciphertext(raw);

        let mut seeds: Vec<String> = if self.seeds_only {
            Vec::new()
        } else {
            DEFAULT_SEED_KEYS.iter().map(|s| s.to_string()).collect()
        };
        seeds.extend(self.seeds.iter().map(|s| s.trim().to_uppercase()));

        Ok(SearchRequest {
            ciphertext,
            method,
            seeds,
            max_key_length: self.max_key_length,
            workers: self.worker_count(),
        })
    }
}

/// Uppercase the input and strip everything that is not an ASCII letter.
/// The core expects normalized ciphertext; normalization lives with the
/// caller.
pub fn normalize_ciphertext(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            ciphertext: None,
            method: "shift".to_string(),
            max_key_length: 12,
            workers: 0,
            seeds: Vec::new(),
            seeds_only: false,
            json: false,
        }
    }

    #[test]
    fn test_args_validation() {
        assert!(base_args().validate().is_ok());
    }

    #[test]
    fn test_invalid_method_rejected() {
        let args = Args {
            method: "rot13".to_string(),
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_zero_max_key_length_rejected() {
        let args = Args {
            max_key_length: 0,
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_seeds_only_requires_seeds() {
        let args = Args {
            seeds_only: true,
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_ciphertext("ob kr?uo-xo\ngh"), "OBKRUOXOGH");
        assert_eq!(normalize_ciphertext("123 !?"), "");
    }

    #[test]
    fn test_default_request_uses_k4() {
        let request = base_args().to_request().unwrap();
        assert_eq!(request.ciphertext, K4_CIPHERTEXT);
        assert_eq!(request.method, CipherMethod::ShiftSubstitution);
        assert_eq!(request.seeds.len(), DEFAULT_SEED_KEYS.len());
        assert!(request.workers >= 1);
        assert!(request.workers <= MAX_WORKERS);
    }

    #[test]
    fn test_extra_seeds_are_uppercased() {
        let args = Args {
            seeds: vec!["  lodestone ".to_string()],
            ..base_args()
        };
        let request = args.to_request().unwrap();
        assert!(request.seeds.contains(&"LODESTONE".to_string()));
        assert_eq!(request.seeds.len(), DEFAULT_SEED_KEYS.len() + 1);
    }

    #[test]
    fn test_seeds_only_replaces_builtin_list() {
        let args = Args {
            seeds: vec!["BERLIN".to_string()],
            seeds_only: true,
            ..base_args()
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.seeds, vec!["BERLIN".to_string()]);
    }

    #[test]
    fn test_explicit_worker_count_passes_through() {
        let args = Args {
            workers: 3,
            ..base_args()
        };
        assert_eq!(args.worker_count(), 3);
    }
}
