//! Terminal implementations of the view ports.
//!
//! Screens only record what the page controllers asked for; the renderer reads them
//! back on the next frame.

use crate::models::QuizStep;
use crate::results::ProductCard;
use crate::view::{HistoryItem, HistoryView, PageNav, QuizView, ResultsView};

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsState {
    #[default]
    Idle,
    Loading,
    Cards(Vec<ProductCard>),
    Empty,
    Error(String),
}

/// Product grid shared by both pages
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    pub visible: bool,
    pub state: ResultsState,
    pub nav: PageNav,
}

impl ResultsPanel {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.state = ResultsState::Idle;
        }
    }
}

/// Quiz page screen state
#[derive(Debug, Clone)]
pub struct QuizScreen {
    pub steps: Vec<QuizStep>,
    pub active_step: usize,
    /// Highlighted option of the active step
    pub cursor: usize,
    pub back_visible: bool,
    pub restart_visible: bool,
    /// Selected value per step
    pub selected: Vec<Option<String>>,
    pub results: ResultsPanel,
    pub scroll: u16,
    pub needs_redraw: bool,
}

impl QuizScreen {
    pub fn new(steps: Vec<QuizStep>) -> Self {
        let selected = vec![None; steps.len()];
        Self {
            steps,
            active_step: 0,
            cursor: 0,
            back_visible: false,
            restart_visible: false,
            selected,
            results: ResultsPanel::default(),
            scroll: 0,
            needs_redraw: true,
        }
    }

    pub fn active(&self) -> Option<&QuizStep> {
        self.steps.get(self.active_step)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let Some(count) = self.active().map(|step| step.options.len()) else {
            return;
        };
        if count == 0 {
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, count as isize - 1) as usize;
        if next != self.cursor {
            self.cursor = next;
            self.needs_redraw = true;
        }
    }

    /// Value of the highlighted option
    pub fn cursor_value(&self) -> Option<&str> {
        self.active().and_then(|step| step.options.get(self.cursor)).map(|o| o.value.as_str())
    }
}

impl QuizView for QuizScreen {
    fn show_step(&mut self, index: usize) {
        self.active_step = index;
        // Land on the previous answer when revisiting a step
        self.cursor = self
            .selected
            .get(index)
            .and_then(|value| value.as_deref())
            .and_then(|value| {
                self.steps.get(index)?.options.iter().position(|o| o.value == value)
            })
            .unwrap_or(0);
        self.needs_redraw = true;
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.back_visible = visible;
        self.needs_redraw = true;
    }

    fn mark_selected(&mut self, step: usize, value: &str) {
        if let Some(slot) = self.selected.get_mut(step) {
            *slot = Some(value.to_string());
        }
        self.needs_redraw = true;
    }

    fn clear_selected(&mut self) {
        self.selected.iter_mut().for_each(|slot| *slot = None);
        self.needs_redraw = true;
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
        self.needs_redraw = true;
    }

    fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.needs_redraw = true;
    }
}

impl ResultsView for QuizScreen {
    fn set_results_visible(&mut self, visible: bool) {
        self.results.set_visible(visible);
        self.needs_redraw = true;
    }

    fn show_loading(&mut self) {
        self.results.state = ResultsState::Loading;
        self.needs_redraw = true;
    }

    fn show_cards(&mut self, cards: &[ProductCard]) {
        self.results.state = ResultsState::Cards(cards.to_vec());
        self.needs_redraw = true;
    }

    fn show_empty(&mut self) {
        self.results.state = ResultsState::Empty;
        self.needs_redraw = true;
    }

    fn show_error(&mut self, message: &str) {
        self.results.state = ResultsState::Error(message.to_string());
        self.needs_redraw = true;
    }

    fn set_page_nav(&mut self, nav: PageNav) {
        self.results.nav = nav;
        self.needs_redraw = true;
    }
}

/// Catalog page screen state; the form itself is read from the page
#[derive(Debug, Clone)]
pub struct CatalogScreen {
    pub results: ResultsPanel,
    pub history: Option<Vec<HistoryItem>>,
    pub needs_redraw: bool,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self { results: ResultsPanel::default(), history: None, needs_redraw: true }
    }
}

impl ResultsView for CatalogScreen {
    fn set_results_visible(&mut self, visible: bool) {
        self.results.set_visible(visible);
        self.needs_redraw = true;
    }

    fn show_loading(&mut self) {
        self.results.state = ResultsState::Loading;
        self.needs_redraw = true;
    }

    fn show_cards(&mut self, cards: &[ProductCard]) {
        self.results.state = ResultsState::Cards(cards.to_vec());
        self.needs_redraw = true;
    }

    fn show_empty(&mut self) {
        self.results.state = ResultsState::Empty;
        self.needs_redraw = true;
    }

    fn show_error(&mut self, message: &str) {
        self.results.state = ResultsState::Error(message.to_string());
        self.needs_redraw = true;
    }

    fn set_page_nav(&mut self, nav: PageNav) {
        self.results.nav = nav;
        self.needs_redraw = true;
    }
}

impl HistoryView for CatalogScreen {
    fn show_history(&mut self, items: &[HistoryItem]) {
        self.history = Some(items.to_vec());
        self.needs_redraw = true;
    }

    fn hide_history(&mut self) {
        self.history = None;
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorefrontLayout;

    #[test]
    fn test_show_step_restores_cursor_on_answer() {
        let mut screen = QuizScreen::new(StorefrontLayout::default().quiz);
        screen.mark_selected(0, "3");
        screen.show_step(1);
        assert_eq!(screen.cursor, 0);

        screen.show_step(0);
        assert_eq!(screen.cursor, 2);
        assert_eq!(screen.cursor_value(), Some("3"));
    }

    #[test]
    fn test_cursor_clamped_to_options() {
        let mut screen = QuizScreen::new(StorefrontLayout::default().quiz);
        screen.move_cursor(-1);
        assert_eq!(screen.cursor, 0);
        screen.move_cursor(10);
        assert_eq!(screen.cursor, 3);
    }

    #[test]
    fn test_hiding_results_clears_state() {
        let mut screen = CatalogScreen::default();
        screen.show_error("boom");
        screen.set_results_visible(false);
        assert_eq!(screen.results.state, ResultsState::Idle);
    }

    #[test]
    fn test_clear_selected() {
        let mut screen = QuizScreen::new(StorefrontLayout::default().quiz);
        screen.mark_selected(0, "1");
        screen.clear_selected();
        assert!(screen.selected.iter().all(Option::is_none));
    }
}
