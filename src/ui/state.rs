//! Chat box state

use crate::ui::MessageSink;
use std::collections::VecDeque;

/// Maximum chat entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Bounded history of displayed messages, newest last
#[derive(Debug)]
pub struct ChatLog {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

/// An entry in the chat log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub message: String,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            next_seq: 0,
        }
    }

    /// Add an entry, evicting the oldest when full
    pub fn push(&mut self, message: String) {
        if self.entries.len() >= MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            message,
        });
        self.next_seq += 1;
    }

    /// What the chat box currently shows
    pub fn current(&self) -> Option<&str> {
        self.entries.back().map(|e| e.message.as_str())
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl MessageSink for ChatLog {
    fn display(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
