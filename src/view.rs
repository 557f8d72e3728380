//! View ports: what the page controllers may do to the screen.
//!
//! Controllers receive their views at construction and never reach for screen state
//! themselves, so every rendering decision can be checked with a recording double.

use crate::results::ProductCard;

/// State of the prev/next page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub visible: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PageNav {
    pub const HIDDEN: PageNav =
        PageNav { visible: false, prev_disabled: true, next_disabled: true };
}

impl Default for PageNav {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Quiz step markup
pub trait QuizView {
    /// Show step `index` and hide all others
    fn show_step(&mut self, index: usize);
    fn set_back_visible(&mut self, visible: bool);
    /// Mark `value` as the selected option of `step`, unmarking its siblings
    fn mark_selected(&mut self, step: usize, value: &str);
    fn clear_selected(&mut self);
    fn set_restart_visible(&mut self, visible: bool);
    fn scroll_to_top(&mut self);
}

/// Product grid with its pagination controls
pub trait ResultsView {
    fn set_results_visible(&mut self, visible: bool);
    fn show_loading(&mut self);
    fn show_cards(&mut self, cards: &[ProductCard]);
    /// Empty state; always offers a reset
    fn show_empty(&mut self);
    /// Error state; always offers retry and reset
    fn show_error(&mut self, message: &str);
    fn set_page_nav(&mut self, nav: PageNav);
}

/// One row of the search history dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub query: String,
    /// Filter badges; empty means the placeholder is shown
    pub badges: Vec<String>,
}

/// Search history dropdown under the query field
pub trait HistoryView {
    fn show_history(&mut self, items: &[HistoryItem]);
    fn hide_history(&mut self);
}
