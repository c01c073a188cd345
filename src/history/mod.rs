//! # Exchange History
//!
//! Records every HTTP exchange the client performs so the run report can
//! show what was actually sent and what came back.

use std::collections::VecDeque;

use serde::Serialize;

use crate::http::method::HttpMethod;

/// Maximum number of history entries to retain.
const MAX_HISTORY_ENTRIES: usize = 100;

/// A single exchange. `status` is `None` when no response arrived.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub timestamp_ms: u64,
    pub method: HttpMethod,
    pub url: String,
    pub status: Option<u16>,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append an entry, evicting the oldest one once the list is full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }
}
