use std::time::{Duration, Instant};

use crate::models::SearchHistoryEntry;
use crate::utils::single_line;
use crate::view::HistoryItem;

/// How long a hidden dropdown still accepts a selection
pub const HIDE_GRACE: Duration = Duration::from_millis(200);

/// Shown under a history item that has no filter badges
pub const NO_FILTERS_LABEL: &str = "No filters";

/// Open/closed state of the history dropdown.
///
/// Hiding is deferred by [`HIDE_GRACE`] so that a selection racing the focus loss
/// still lands. Time is passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct HistoryDropdown {
    open: bool,
    hide_at: Option<Instant>,
    highlighted: usize,
}

impl HistoryDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open over `len` items. Nothing happens when there are none.
    pub fn show(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.open = true;
        self.hide_at = None;
        self.highlighted = self.highlighted.min(len - 1);
        true
    }

    /// Schedule closing after the grace delay
    pub fn hide(&mut self, now: Instant) {
        if self.open && self.hide_at.is_none() {
            self.hide_at = Some(now + HIDE_GRACE);
        }
    }

    /// Close if the grace delay ran out. Returns true when it just closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Pick item `index` of `len`; `None` when the dropdown is already gone
    pub fn select(&mut self, index: usize, len: usize, now: Instant) -> Option<usize> {
        self.tick(now);
        if !self.open || index >= len {
            return None;
        }
        self.close();
        Some(index)
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hide_at = None;
        self.highlighted = 0;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_hiding(&self) -> bool {
        self.hide_at.is_some()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn move_down(&mut self, len: usize) {
        if self.open && self.highlighted + 1 < len {
            self.highlighted += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.open {
            self.highlighted = self.highlighted.saturating_sub(1);
        }
    }
}

/// Dropdown rows for the stored entries, sanitized for display
pub fn history_items(entries: &[SearchHistoryEntry]) -> Vec<HistoryItem> {
    entries
        .iter()
        .map(|entry| HistoryItem {
            query: single_line(&entry.query),
            badges: entry.filter_labels.iter().map(|label| single_line(label)).collect(),
        })
        .collect()
}
