use tracing::{debug, info, warn};

use super::controller::{QuizController, SelectOutcome};
use crate::api::{FetchError, Generation, ProductQuery, ProductSource, RequestTracker};
use crate::error::Result;
use crate::models::{ProductSummary, QuizStep};
use crate::results::{PriceStyle, ResultPaginator, cards_for};
use crate::view::{PageNav, QuizView, ResultsView};

/// A search the page wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: Generation,
    pub query: ProductQuery,
}

/// Quiz page: questions, result grid and their controls.
///
/// The page never performs I/O. Selecting the last answer hands out a
/// [`FetchTicket`]; whoever runs it reports back through [`QuizPage::apply_results`].
pub struct QuizPage<V> {
    controller: QuizController,
    paginator: ResultPaginator,
    tracker: RequestTracker,
    last_query: Option<ProductQuery>,
    view: V,
}

impl<V: QuizView + ResultsView> QuizPage<V> {
    pub fn new(steps: Vec<QuizStep>, mut view: V) -> Result<Self> {
        let controller = QuizController::new(steps)?;

        view.show_step(0);
        view.set_back_visible(false);
        view.set_restart_visible(false);
        view.set_results_visible(false);
        view.set_page_nav(PageNav::HIDDEN);

        Ok(Self {
            controller,
            paginator: ResultPaginator::new(),
            tracker: RequestTracker::new(),
            last_query: None,
            view,
        })
    }

    /// Answer the active step. Returns a ticket when the quiz is complete.
    pub fn select_option(&mut self, step_index: usize, value: &str) -> Result<Option<FetchTicket>> {
        let outcome = self.controller.select_option(step_index, value)?;
        self.view.mark_selected(step_index, value);

        match outcome {
            SelectOutcome::Advanced(next) => {
                self.view.show_step(next);
                self.view.set_back_visible(true);
                Ok(None)
            }
            SelectOutcome::Completed(query) => {
                info!(query = %query.to_query_string(), "Quiz completed");
                Ok(Some(self.issue(query)))
            }
        }
    }

    fn issue(&mut self, query: ProductQuery) -> FetchTicket {
        let generation = self.tracker.issue();
        self.last_query = Some(query.clone());

        self.view.set_results_visible(true);
        self.view.set_page_nav(PageNav::HIDDEN);
        self.view.show_loading();

        FetchTicket { generation, query }
    }

    /// Show the outcome of a search. Returns false when the response was superseded.
    pub fn apply_results(
        &mut self,
        generation: Generation,
        result: std::result::Result<Vec<ProductSummary>, FetchError>,
    ) -> bool {
        if !self.tracker.is_current(generation) {
            debug!(generation = generation.value(), "Dropping stale quiz results");
            return false;
        }

        match result {
            Ok(products) if products.is_empty() => {
                self.paginator.clear();
                self.view.show_empty();
                self.view.set_page_nav(PageNav::HIDDEN);
            }
            Ok(products) => {
                debug!(count = products.len(), "Quiz results received");
                self.paginator.replace(products);
                self.render_page(0);
            }
            Err(err) => {
                warn!(error = %err, "Quiz search failed");
                self.paginator.clear();
                self.view.show_error(&err.user_message());
                self.view.set_page_nav(PageNav::HIDDEN);
            }
        }

        self.view.set_restart_visible(true);
        true
    }

    /// Perform a ticket synchronously against `source`
    pub fn run_fetch(&mut self, ticket: FetchTicket, source: &dyn ProductSource) -> bool {
        let result = source.search_products(&ticket.query);
        self.apply_results(ticket.generation, result)
    }

    fn render_page(&mut self, page: usize) {
        let slice = self.paginator.render(page);
        let cards = cards_for(slice.items, PriceStyle::Decimal);
        self.view.show_cards(&cards);
        self.view.set_page_nav(slice.nav);
    }

    pub fn next_page(&mut self) -> bool {
        if !self.paginator.next() {
            return false;
        }
        let page = self.paginator.page();
        self.render_page(page);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.paginator.prev() {
            return false;
        }
        let page = self.paginator.page();
        self.render_page(page);
        true
    }

    /// Re-issue the last search, if any
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let query = self.last_query.clone()?;
        info!("Retrying quiz search");
        Some(self.issue(query))
    }

    /// Step back one question, dropping any shown or pending results
    pub fn go_back(&mut self) -> bool {
        let Some(step) = self.controller.go_back() else {
            return false;
        };

        self.tracker.invalidate();
        self.paginator.clear();
        self.view.set_results_visible(false);
        self.view.set_page_nav(PageNav::HIDDEN);
        self.view.set_restart_visible(false);
        self.view.show_step(step);
        self.view.set_back_visible(step > 0);
        true
    }

    /// Start over from the first question
    pub fn reset(&mut self) {
        self.controller.reset();
        self.tracker.invalidate();
        self.paginator.clear();
        self.last_query = None;

        self.view.clear_selected();
        self.view.set_results_visible(false);
        self.view.set_page_nav(PageNav::HIDDEN);
        self.view.set_restart_visible(false);
        self.view.show_step(0);
        self.view.set_back_visible(false);
        self.view.scroll_to_top();
    }

    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    pub fn paginator(&self) -> &ResultPaginator {
        &self.paginator
    }

    pub fn last_query(&self) -> Option<&ProductQuery> {
        self.last_query.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
