use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A remembered search term together with how often it was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub count: i64,
    /// Store-assigned recency sequence; larger means more recently updated.
    pub last_used: i64,
}

impl HistoryEntry {
    pub fn new(name: &str, count: i64, last_used: i64) -> Self {
        Self {
            name: name.to_string(),
            count,
            last_used,
        }
    }

    /// Presentation order: higher count first, then most recently used first.
    pub fn display_order(a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| b.last_used.cmp(&a.last_used))
    }
}
