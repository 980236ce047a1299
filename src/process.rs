//! Record enrichment.
//!
//! Turns a validated [`RawRecord`] into a [`Draft`]: normalized name,
//! trimmed message, derived word and character counts, and an enrichment
//! timestamp. Id assignment is the board's job, not ours.

use chrono::Utc;

use crate::models::{Draft, RawRecord};

/// Enriches a raw record that has already passed validation.
///
/// Deterministic apart from the `created_at` timestamp. The unmodified
/// client mapping is kept under `original` for audit.
pub fn process(raw: &RawRecord) -> Draft {
    let name = raw.name.as_deref().unwrap_or_default().trim();
    let message = raw.message.as_deref().unwrap_or_default().trim().to_string();

    Draft {
        name: title_case(name),
        word_count: message.split_whitespace().count(),
        char_count: message.chars().count(),
        message,
        created_at: Utc::now(),
        original: serde_json::to_value(raw).unwrap_or_else(|_| serde_json::json!({})),
    }
}

/// Title-cases a string: each alphabetic run starts uppercase and
/// continues lowercase, so `"mary jane o'brien"` becomes
/// `"Mary Jane O'Brien"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
