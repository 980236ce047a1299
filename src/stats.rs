//! Summary statistics over the board contents.
//!
//! Recomputed from scratch on every call; nothing incremental is
//! maintained. Cheap at the store sizes this service holds.

use crate::models::{BoardStats, Message};

/// Computes summary statistics over the given records.
///
/// Empty input yields zeroed counts and `None` extremes rather than an
/// error. Ties for longest/shortest go to the earliest-inserted record.
pub fn board_stats(records: &[Message]) -> BoardStats {
    if records.is_empty() {
        return BoardStats {
            total: 0,
            average_length: 0.0,
            longest: None,
            shortest: None,
            total_words: 0,
        };
    }

    let total_chars: usize = records.iter().map(|m| m.char_count).sum();
    let total_words: usize = records.iter().map(|m| m.word_count).sum();

    // Strict comparisons keep the first occurrence on ties.
    let mut longest = &records[0];
    let mut shortest = &records[0];
    for m in &records[1..] {
        if m.char_count > longest.char_count {
            longest = m;
        }
        if m.char_count < shortest.char_count {
            shortest = m;
        }
    }

    BoardStats {
        total: records.len(),
        average_length: total_chars as f64 / records.len() as f64,
        longest: Some(longest.message.clone()),
        shortest: Some(shortest.message.clone()),
        total_words,
    }
}
