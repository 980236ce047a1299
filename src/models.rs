//! Core data types used throughout Pinwall.
//!
//! These types represent the records that flow through the validation,
//! enrichment, and storage pipeline, and the statistics computed over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unvalidated client input, as posted to `POST /api/messages`.
///
/// Only `name` and `message` are inspected; any additional keys the client
/// sends are preserved via `flatten` so the audit copy under
/// [`Message::original`] reproduces the request body exactly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A processed record before the board assigns it an id.
///
/// Produced by [`crate::process::process`] from a validated [`RawRecord`].
#[derive(Debug, Clone)]
pub struct Draft {
    /// Trimmed, title-cased display name.
    pub name: String,
    /// Trimmed message body.
    pub message: String,
    /// Whitespace-delimited token count of the trimmed message.
    pub word_count: usize,
    /// Unicode scalar count of the trimmed message.
    pub char_count: usize,
    /// Enrichment timestamp.
    pub created_at: DateTime<Utc>,
    /// The unmodified client mapping, retained for audit.
    pub original: serde_json::Value,
}

/// A stored message: a [`Draft`] with an id assigned by the board.
///
/// `word_count` and `char_count` are derived at insertion time and never
/// recomputed, even when [`crate::store::Board::update`] changes the text.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: u64,
    pub name: String,
    pub message: String,
    pub word_count: usize,
    pub char_count: usize,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub original: serde_json::Value,
}

/// Partial update applied by `PUT /api/messages/{id}`.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Summary statistics over the current board contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardStats {
    /// Number of stored messages.
    pub total: usize,
    /// Mean `char_count`, 0.0 when the board is empty.
    pub average_length: f64,
    /// Message text with the highest `char_count` (first wins ties).
    pub longest: Option<String>,
    /// Message text with the lowest `char_count` (first wins ties).
    pub shortest: Option<String>,
    /// Sum of `word_count` across all messages.
    pub total_words: usize,
}
