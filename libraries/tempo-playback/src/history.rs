//! Listen history tracking
//!
//! Bounded log of item names a session has started playing

use std::collections::VecDeque;

/// Listen history with bounded size
///
/// Ring buffer that discards the oldest entries once full.
#[derive(Debug, Clone)]
pub struct ListenHistory {
    /// Item names (most recent = back)
    items: VecDeque<String>,

    max_size: usize,
}

impl ListenHistory {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(max_size.min(64)),
            max_size,
        }
    }

    /// Record a listen
    ///
    /// If history is full, oldest entry is discarded
    pub fn push(&mut self, item: impl Into<String>) {
        if self.max_size == 0 {
            return;
        }
        if self.items.len() >= self.max_size {
            self.items.pop_front();
        }
        self.items.push_back(item.into());
    }

    /// Most recent listen
    pub fn last(&self) -> Option<&str> {
        self.items.back().map(String::as_str)
    }

    /// All listens, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ListenHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
