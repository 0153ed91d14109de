//! `word_list` — loading and preprocessing the crossword vocabulary.
//!
//! The input format is one word per line. The output is a flat, sorted,
//! deduplicated `Vec<String>` of uppercase words ready to seed the solver's
//! domains.
//!
//! Normalization rules:
//! - Surrounding whitespace is trimmed; empty lines are skipped.
//! - Words are uppercased.
//! - Entries containing anything other than ASCII letters are skipped, so
//!   that a word's byte length and byte indices coincide with its letter
//!   count and letter positions. The solver relies on this when comparing
//!   crossing letters by byte index.

use crate::errors::GridError;
use std::fs;
use std::path::Path;

/// Parse a raw word list from an in-memory string.
///
/// Returns the normalized vocabulary: uppercase, ASCII-alphabetic only,
/// sorted and deduplicated.
pub fn parse_from_str(contents: &str) -> Vec<String> {
    let mut words: Vec<String> = contents
        .lines()
        .filter_map(|raw_line| {
            let line = raw_line.trim();
            if line.is_empty() || !line.bytes().all(|b| b.is_ascii_alphabetic()) {
                None
            } else {
                Some(line.to_ascii_uppercase())
            }
        })
        .collect();

    // sort + dedup rather than a HashSet: we want the sorted Vec anyway,
    // and dedup() only removes adjacent duplicates
    words.sort();
    words.dedup();
    words
}

/// Read and parse a word list from a file path.
///
/// # Errors
///
/// Returns [`GridError::Io`] if the file cannot be read.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GridError> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_from_str(&contents))
}
