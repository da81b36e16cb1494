//! Decryption transforms over a keyed 26-symbol alphabet

use crate::error::{Result, SearchError};
use crate::tables::KRYPTOS_ALPHABET;
use crate::types::CipherMethod;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Applies the supported transforms for a fixed 26-symbol alphabet.
///
/// The alphabet is an arbitrary permutation of distinct symbols; shift
/// arithmetic happens over indices into that ordering, not over Unicode
/// code points. Symbols outside the alphabet pass through unchanged and
/// do not consume key material.
#[derive(Debug, Clone)]
pub struct CipherEngine {
    letters: Vec<char>,
    /// ASCII symbol -> alphabet index, -1 if absent
    positions: [i8; 128],
}

impl Default for CipherEngine {
    fn default() -> Self {
        Self::new(KRYPTOS_ALPHABET).expect("builtin alphabet is valid")
    }
}

impl CipherEngine {
    /// Build an engine for a custom 26-symbol alphabet
    pub fn new(alphabet: &str) -> Result<Self> {
        let letters: Vec<char> = alphabet.chars().collect();
        if letters.len() != 26 {
            return Err(SearchError::InvalidAlphabet(format!(
                "expected 26 symbols, got {}",
                letters.len()
            )));
        }

        let mut positions = [-1i8; 128];
        for (i, &c) in letters.iter().enumerate() {
            let idx = c as usize;
            if idx >= 128 || positions[idx] >= 0 {
                return Err(SearchError::InvalidAlphabet(format!(
                    "invalid or repeated symbol '{}'",
                    c
                )));
            }
            positions[idx] = i as i8;
        }

        Ok(Self { letters, positions })
    }

    /// Decrypt `ciphertext` with `key` using the selected transform
    pub fn decrypt(&self, ciphertext: &str, key: &str, method: CipherMethod) -> Result<String> {
        match method {
            CipherMethod::ShiftSubstitution => self.shift(ciphertext, key, Direction::Decrypt),
            CipherMethod::ColumnarTransposition => self.transpose_decrypt(ciphertext, key),
        }
    }

    /// Encrypt `plaintext` with `key`, the exact inverse of `decrypt`
    /// under the same key and method
    pub fn encrypt(&self, plaintext: &str, key: &str, method: CipherMethod) -> Result<String> {
        match method {
            CipherMethod::ShiftSubstitution => self.shift(plaintext, key, Direction::Encrypt),
            CipherMethod::ColumnarTransposition => self.transpose_encrypt(plaintext, key),
        }
    }

    fn index_of(&self, c: char) -> Option<usize> {
        let idx = c as usize;
        if idx < 128 && self.positions[idx] >= 0 {
            Some(self.positions[idx] as usize)
        } else {
            None
        }
    }

    /// Shift indices for each key symbol, case-folded to upper.
    /// Key symbols outside the alphabet shift by zero.
    fn key_shifts(&self, key: &str) -> Result<Vec<usize>> {
        if key.is_empty() {
            return Err(SearchError::InvalidKey("key must not be empty".to_string()));
        }
        Ok(key
            .chars()
            .map(|c| self.index_of(c.to_ascii_uppercase()).unwrap_or(0))
            .collect())
    }

    fn shift(&self, text: &str, key: &str, direction: Direction) -> Result<String> {
        let shifts = self.key_shifts(key)?;
        let mut out = String::with_capacity(text.len());
        // The key cursor advances only on alphabet symbols, so passthrough
        // characters never consume key material
        let mut cursor = 0usize;

        for c in text.chars() {
            match self.index_of(c) {
                Some(text_idx) => {
                    let key_idx = shifts[cursor % shifts.len()];
                    let out_idx = match direction {
                        Direction::Encrypt => (text_idx + key_idx) % 26,
                        Direction::Decrypt => (text_idx + 26 - key_idx) % 26,
                    };
                    out.push(self.letters[out_idx]);
                    cursor += 1;
                }
                None => out.push(c),
            }
        }

        Ok(out)
    }

    /// Column read order: the permutation that sorts the key's symbols
    /// (case-folded to upper), ties broken by original column index.
    fn column_order(&self, key: &str) -> Result<Vec<usize>> {
        if key.is_empty() {
            return Err(SearchError::InvalidKey("key must not be empty".to_string()));
        }
        let mut order: Vec<(char, usize)> = key
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .enumerate()
            .map(|(i, c)| (c, i))
            .collect();
        order.sort();
        Ok(order.into_iter().map(|(_, i)| i).collect())
    }

    fn transpose_decrypt(&self, ciphertext: &str, key: &str) -> Result<String> {
        let order = self.column_order(key)?;
        let columns = order.len();
        let chars: Vec<char> = ciphertext.chars().collect();
        let rows = (chars.len() + columns - 1) / columns;
        let heights = column_heights(chars.len(), columns);

        // Rebuild the grid column by column in sorted key order; each
        // column receives exactly its ragged-grid height so a non-full
        // final row cannot misalign later columns
        let mut grid: Vec<Vec<char>> = heights
            .iter()
            .map(|&h| Vec::with_capacity(h))
            .collect();
        let mut pos = 0usize;
        for &col in &order {
            let take = heights[col];
            grid[col].extend_from_slice(&chars[pos..pos + take]);
            pos += take;
        }

        // Read back row by row in natural column order
        let mut out = String::with_capacity(chars.len());
        for row in 0..rows {
            for column in grid.iter() {
                if let Some(&c) = column.get(row) {
                    out.push(c);
                }
            }
        }
        Ok(out)
    }

    fn transpose_encrypt(&self, plaintext: &str, key: &str) -> Result<String> {
        let order = self.column_order(key)?;
        let columns = order.len();
        let chars: Vec<char> = plaintext.chars().collect();

        let mut out = String::with_capacity(chars.len());
        for &col in &order {
            let mut i = col;
            while i < chars.len() {
                out.push(chars[i]);
                i += columns;
            }
        }
        Ok(out)
    }
}

/// Heights of each column (in original order) when `len` characters fill a
/// row-major grid of `columns` columns: the first `len % columns` columns
/// hold a full row count, the rest one fewer.
fn column_heights(len: usize, columns: usize) -> Vec<usize> {
    let rows = (len + columns - 1) / columns;
    let remainder = len % columns;
    (0..columns)
        .map(|c| {
            if remainder == 0 || c < remainder {
                rows
            } else {
                rows - 1
            }
        })
        .collect()
}
