//! In-memory message board.
//!
//! An ordered, insertion-order-preserving sequence of [`Message`] records
//! behind `std::sync::RwLock`, with a monotonic id counter. Lookups and
//! search are linear scans; no index is maintained. One instance is
//! constructed at startup and shared with the route layer via `Arc`, so
//! tests get isolated boards for free.
//!
//! Ids are taken from an `AtomicU64` that is never decremented, so a
//! deleted message's id is never reissued to a later insert.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;

use crate::models::{Draft, Message, MessageUpdate};

/// In-memory collection store for enriched messages.
pub struct Board {
    records: RwLock<Vec<Message>>,
    next_id: AtomicU64,
}

impl Board {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Assigns the next id to `draft`, appends it, and returns the stored
    /// record.
    pub fn append(&self, draft: Draft) -> Message {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = Message {
            id,
            name: draft.name,
            message: draft.message,
            word_count: draft.word_count,
            char_count: draft.char_count,
            created_at: draft.created_at,
            updated_at: None,
            original: draft.original,
        };
        let mut records = self.records.write().unwrap();
        records.push(message.clone());
        message
    }

    /// All current records in insertion order.
    pub fn list_all(&self) -> Vec<Message> {
        self.records.read().unwrap().clone()
    }

    pub fn find_by_id(&self, id: u64) -> Option<Message> {
        let records = self.records.read().unwrap();
        records.iter().find(|m| m.id == id).cloned()
    }

    /// Merges the provided fields into the record and stamps `updated_at`.
    ///
    /// The derived `word_count`/`char_count` are pinned to insertion time
    /// and deliberately left alone. Returns the updated record, or `None`
    /// if no record has that id.
    pub fn update(&self, id: u64, update: MessageUpdate) -> Option<Message> {
        let mut records = self.records.write().unwrap();
        let record = records.iter_mut().find(|m| m.id == id)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(message) = update.message {
            record.message = message;
        }
        record.updated_at = Some(Utc::now());
        Some(record.clone())
    }

    /// Removes the record with `id`. Remaining records keep their order
    /// and their ids; nothing is renumbered.
    pub fn delete_by_id(&self, id: u64) -> bool {
        let mut records = self.records.write().unwrap();
        let before = records.len();
        records.retain(|m| m.id != id);
        records.len() < before
    }

    /// Case-insensitive substring search over `name` and `message`,
    /// returning matches in insertion order.
    pub fn search(&self, query: &str) -> Vec<Message> {
        let needle = query.to_lowercase();
        let records = self.records.read().unwrap();
        records
            .iter()
            .filter(|m| {
                m.message.to_lowercase().contains(&needle)
                    || m.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
