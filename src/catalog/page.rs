use std::time::Instant;

use tracing::{debug, info, warn};

use super::form::FilterForm;
use crate::api::{FetchError, Generation, ProductQuery, ProductSource, RequestTracker};
use crate::models::{CatalogLayout, ProductSummary};
use crate::quiz::FetchTicket;
use crate::results::{PriceStyle, cards_for};
use crate::search_history::{HistoryDropdown, SearchHistory, history_items};
use crate::view::{HistoryView, PageNav, ResultsView};

/// Catalog page: filter form, unpaginated result grid and the search history dropdown
pub struct CatalogPage<V> {
    form: FilterForm,
    history: SearchHistory,
    dropdown: HistoryDropdown,
    tracker: RequestTracker,
    results: Vec<ProductSummary>,
    last_query: Option<ProductQuery>,
    view: V,
}

impl<V: ResultsView + HistoryView> CatalogPage<V> {
    pub fn new(layout: &CatalogLayout, history: SearchHistory, mut view: V) -> Self {
        view.set_results_visible(true);
        view.set_page_nav(PageNav::HIDDEN);

        Self {
            form: FilterForm::from_layout(layout),
            history,
            dropdown: HistoryDropdown::new(),
            tracker: RequestTracker::new(),
            results: Vec::new(),
            last_query: None,
            view,
        }
    }

    /// Record the search, then ask for its results
    pub fn submit(&mut self) -> FetchTicket {
        let selections = self.form.selections();
        self.history.record_search(&self.form.query, &selections, self.form.sort(), &self.form);
        // An open dropdown must list entries in the order `select_history` indexes them
        if self.dropdown.is_open() && self.dropdown.show(self.history.len()) {
            self.view.show_history(&history_items(self.history.entries()));
        }
        self.issue(self.form.to_query())
    }

    /// Clear the form and sort, then search again
    pub fn reset_filters(&mut self) -> FetchTicket {
        self.form.reset();
        self.submit()
    }

    pub fn retry(&mut self) -> Option<FetchTicket> {
        let query = self.last_query.clone()?;
        info!("Retrying catalog search");
        Some(self.issue(query))
    }

    fn issue(&mut self, query: ProductQuery) -> FetchTicket {
        let generation = self.tracker.issue();
        debug!(generation = generation.value(), query = %query.to_query_string(), "Catalog search");
        self.last_query = Some(query.clone());
        self.view.show_loading();
        FetchTicket { generation, query }
    }

    /// Show the outcome of a search. Returns false when the response was superseded.
    pub fn apply_results(
        &mut self,
        generation: Generation,
        result: Result<Vec<ProductSummary>, FetchError>,
    ) -> bool {
        if !self.tracker.is_current(generation) {
            debug!(generation = generation.value(), "Dropping stale catalog results");
            return false;
        }

        match result {
            Ok(products) if products.is_empty() => {
                self.results.clear();
                self.view.show_empty();
            }
            Ok(products) => {
                self.results = products;
                self.view.show_cards(&cards_for(&self.results, PriceStyle::Rounded));
            }
            Err(err) => {
                warn!(error = %err, "Catalog search failed");
                self.results.clear();
                self.view.show_error(&err.user_message());
            }
        }
        self.view.set_page_nav(PageNav::HIDDEN);
        true
    }

    pub fn run_fetch(&mut self, ticket: FetchTicket, source: &dyn ProductSource) -> bool {
        let result = source.search_products(&ticket.query);
        self.apply_results(ticket.generation, result)
    }

    /// Query field gained focus: offer the history
    pub fn focus_search(&mut self) {
        if self.dropdown.show(self.history.len()) {
            self.view.show_history(&history_items(self.history.entries()));
        }
    }

    /// Query field lost focus: the dropdown closes after its grace delay
    pub fn blur_search(&mut self, now: Instant) {
        self.dropdown.hide(now);
    }

    /// Advance time-based state
    pub fn tick(&mut self, now: Instant) {
        if self.dropdown.tick(now) {
            self.view.hide_history();
        }
    }

    /// Close the dropdown right away
    pub fn dismiss_history(&mut self) {
        if self.dropdown.is_open() {
            self.dropdown.close();
            self.view.hide_history();
        }
    }

    /// Re-apply history entry `index` and search again
    pub fn select_history(&mut self, index: usize, now: Instant) -> Option<FetchTicket> {
        let index = self.dropdown.select(index, self.history.len(), now)?;
        self.view.hide_history();

        let entry = self.history.get(index)?.clone();
        let skipped = self.form.apply_entry(&entry);
        if skipped > 0 {
            debug!(skipped, query = %entry.query, "Some stored selections no longer exist");
        }
        info!(query = %entry.query, "Re-running search from history");
        Some(self.submit())
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilterForm {
        &mut self.form
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn dropdown(&self) -> &HistoryDropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut HistoryDropdown {
        &mut self.dropdown
    }

    pub fn results(&self) -> &[ProductSummary] {
        &self.results
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
