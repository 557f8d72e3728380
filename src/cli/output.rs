//! Plain-text rendering for the one-shot commands.

use crate::models::SearchHistoryEntry;
use crate::results::ProductCard;
use crate::search_history::NO_FILTERS_LABEL;
use crate::utils::{DatePattern, format_date, single_line};
use crate::view::{HistoryItem, HistoryView, PageNav, ResultsView};

/// Final state of a one-shot search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Cards(Vec<ProductCard>),
    Empty,
    Error(String),
}

/// View port that keeps the last outcome for printing
#[derive(Debug, Default)]
pub struct ConsoleView {
    outcome: Option<SearchOutcome>,
}

impl ConsoleView {
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }
}

impl ResultsView for ConsoleView {
    fn set_results_visible(&mut self, _visible: bool) {}

    fn show_loading(&mut self) {
        self.outcome = None;
    }

    fn show_cards(&mut self, cards: &[ProductCard]) {
        self.outcome = Some(SearchOutcome::Cards(cards.to_vec()));
    }

    fn show_empty(&mut self) {
        self.outcome = Some(SearchOutcome::Empty);
    }

    fn show_error(&mut self, message: &str) {
        self.outcome = Some(SearchOutcome::Error(message.to_string()));
    }

    fn set_page_nav(&mut self, _nav: PageNav) {}
}

// No dropdown outside the terminal UI
impl HistoryView for ConsoleView {
    fn show_history(&mut self, _items: &[HistoryItem]) {}
    fn hide_history(&mut self) {}
}

/// Card lines: title and price, then description and link
pub fn format_card(card: &ProductCard) -> String {
    format!(
        "{} - {}\n    {}\n    {}",
        single_line(&card.title),
        card.price,
        single_line(&card.description),
        card.link
    )
}

/// One numbered history line, numbering from 1
pub fn format_history_entry(
    position: usize,
    entry: &SearchHistoryEntry,
    pattern: DatePattern,
) -> String {
    let badges = if entry.filter_labels.is_empty() {
        NO_FILTERS_LABEL.to_string()
    } else {
        entry.filter_labels.iter().map(|label| single_line(label)).collect::<Vec<_>>().join(", ")
    };
    format!(
        "{:>2}. {}  [{}]  {}",
        position,
        single_line(&entry.query),
        badges,
        format_date(&entry.timestamp, pattern)
    )
}
