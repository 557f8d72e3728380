//! Event loops of the interactive pages.
//!
//! Each app owns its page controller and a completion channel. Searches run on worker
//! threads (see [`crate::api::spawn_search`]); the loop drains finished searches before
//! every frame and hands them to the page, which drops superseded ones.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use super::events::{Action, poll_event};
use super::rendering::{CatalogRenderState, render_catalog, render_quiz};
use super::screens::{CatalogScreen, QuizScreen};
use crate::api::{FetchCompletion, SharedSource, spawn_search};
use crate::catalog::CatalogPage;
use crate::models::{CatalogLayout, QuizStep};
use crate::quiz::{FetchTicket, QuizPage};
use crate::search_history::SearchHistory;

/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Duration for info status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Longest accepted query text
const MAX_QUERY_LEN: usize = 256;
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

impl StatusMessage {
    fn new(text: impl Into<String>, message_type: MessageType) -> Self {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        Self {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Search completions flowing back from worker threads
struct Completions {
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
}

impl Completions {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    fn dispatch(&self, source: &SharedSource, ticket: FetchTicket) {
        spawn_search(source.clone(), ticket.generation, ticket.query, self.tx.clone());
    }
}

pub struct QuizApp {
    page: QuizPage<QuizScreen>,
    source: SharedSource,
    completions: Completions,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    last_draw_time: Instant,
}

impl QuizApp {
    pub fn new(steps: Vec<QuizStep>, source: SharedSource) -> Result<Self> {
        let screen = QuizScreen::new(steps.clone());
        let page = QuizPage::new(steps, screen)?;

        Ok(Self {
            page,
            source,
            completions: Completions::new(),
            should_quit: false,
            status_message: None,
            last_draw_time: Instant::now(),
        })
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.drain_completions();
            let expired = clear_expired(&mut self.status_message);

            let now = Instant::now();
            if self.page.view().needs_redraw
                || expired
                || now.duration_since(self.last_draw_time) >= FRAME_INTERVAL
            {
                let status = self.status_message.as_ref();
                terminal.draw(|f| render_quiz(f, self.page.view(), status))?;
                self.page.view_mut().needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(FRAME_INTERVAL)?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.rx.try_recv() {
            self.page.apply_results(completion.generation, completion.result);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        self.status_message = Some(StatusMessage::new(text, message_type));
        self.page.view_mut().needs_redraw = true;
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            // Esc steps back, and leaves from the first question
            Action::Cancel => {
                if !self.page.go_back() {
                    self.should_quit = true;
                }
            }
            Action::MoveUp => self.page.view_mut().move_cursor(-1),
            Action::MoveDown => self.page.view_mut().move_cursor(1),
            Action::PrevPage => {
                self.page.prev_page();
            }
            Action::NextPage => {
                self.page.next_page();
            }
            Action::Confirm => self.select_highlighted(),
            Action::Input(c) => {
                let count = self.page.view().active().map_or(0, |step| step.options.len());
                if let Some(digit) = c.to_digit(10).map(|d| d as usize)
                    && (1..=count).contains(&digit)
                {
                    self.page.view_mut().cursor = digit - 1;
                    self.select_highlighted();
                }
            }
            Action::Backspace => {
                self.page.go_back();
            }
            Action::Restart => {
                info!("Quiz restarted");
                self.page.reset();
            }
            Action::Retry => match self.page.retry() {
                Some(ticket) => self.completions.dispatch(&self.source, ticket),
                None => self.set_status("Nothing to retry", MessageType::Error),
            },
            Action::ToggleFocus | Action::CycleSort | Action::None => {}
        }
    }

    fn select_highlighted(&mut self) {
        let step = self.page.controller().current_step();
        let Some(value) = self.page.view().cursor_value().map(str::to_string) else {
            return;
        };

        match self.page.select_option(step, &value) {
            Ok(Some(ticket)) => self.completions.dispatch(&self.source, ticket),
            Ok(None) => {}
            Err(e) => {
                debug!(error = %e, "Selection rejected");
                self.set_status(e.to_string(), MessageType::Error);
            }
        }
    }
}

/// Which catalog control receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Facets,
    PriceMin,
    PriceMax,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Query => Focus::Facets,
            Focus::Facets => Focus::PriceMin,
            Focus::PriceMin => Focus::PriceMax,
            Focus::PriceMax => Focus::Query,
        }
    }
}

pub struct CatalogApp {
    page: CatalogPage<CatalogScreen>,
    source: SharedSource,
    completions: Completions,
    focus: Focus,
    facet_cursor: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    last_draw_time: Instant,
}

impl CatalogApp {
    pub fn new(layout: &CatalogLayout, history: SearchHistory, source: SharedSource) -> Self {
        Self {
            page: CatalogPage::new(layout, history, CatalogScreen::default()),
            source,
            completions: Completions::new(),
            focus: Focus::Query,
            facet_cursor: 0,
            should_quit: false,
            status_message: None,
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // Initial listing, then offer the history under the focused query field
        self.submit();
        self.page.focus_search();

        while !self.should_quit {
            self.page.tick(Instant::now());
            self.drain_completions();
            let expired = clear_expired(&mut self.status_message);

            let now = Instant::now();
            if self.page.view().needs_redraw
                || expired
                || now.duration_since(self.last_draw_time) >= FRAME_INTERVAL
            {
                terminal.draw(|f| {
                    let state = CatalogRenderState {
                        screen: self.page.view(),
                        form: self.page.form(),
                        focus: self.focus,
                        facet_cursor: self.facet_cursor,
                        history_highlight: self.page.dropdown().highlighted(),
                        status: self.status_message.as_ref(),
                    };
                    render_catalog(f, &state);
                })?;
                self.page.view_mut().needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(FRAME_INTERVAL)?;
            self.handle_action(action, Instant::now());
        }

        Ok(())
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.rx.try_recv() {
            self.page.apply_results(completion.generation, completion.result);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        self.status_message = Some(StatusMessage::new(text, message_type));
        self.page.view_mut().needs_redraw = true;
    }

    fn submit(&mut self) {
        let ticket = self.page.submit();
        self.completions.dispatch(&self.source, ticket);
    }

    fn set_focus(&mut self, focus: Focus, now: Instant) {
        if self.focus == Focus::Query && focus != Focus::Query {
            self.page.blur_search(now);
        }
        if focus == Focus::Query && self.focus != Focus::Query {
            self.page.focus_search();
        }
        self.focus = focus;
        self.page.view_mut().needs_redraw = true;
    }

    fn history_open(&self) -> bool {
        self.focus == Focus::Query && self.page.dropdown().is_open()
    }

    fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                if self.page.dropdown().is_open() {
                    self.page.dismiss_history();
                } else {
                    self.should_quit = true;
                }
            }
            Action::ToggleFocus => self.set_focus(self.focus.next(), now),
            Action::MoveUp => {
                if self.history_open() {
                    self.page.dropdown_mut().move_up();
                    self.page.view_mut().needs_redraw = true;
                } else if self.focus == Focus::Facets {
                    self.facet_cursor = self.facet_cursor.saturating_sub(1);
                    self.page.view_mut().needs_redraw = true;
                }
            }
            Action::MoveDown => {
                if self.history_open() {
                    let len = self.page.history().len();
                    self.page.dropdown_mut().move_down(len);
                    self.page.view_mut().needs_redraw = true;
                } else if self.focus == Focus::Facets {
                    let last = self.page.form().controls().len().saturating_sub(1);
                    self.facet_cursor = (self.facet_cursor + 1).min(last);
                    self.page.view_mut().needs_redraw = true;
                }
            }
            Action::Confirm => {
                if self.history_open() {
                    let index = self.page.dropdown().highlighted();
                    if let Some(ticket) = self.page.select_history(index, now) {
                        self.completions.dispatch(&self.source, ticket);
                    }
                } else {
                    self.page.dismiss_history();
                    self.submit();
                }
            }
            Action::Input(c) => self.input_char(c),
            Action::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                    self.page.view_mut().needs_redraw = true;
                }
                if self.focus == Focus::Query {
                    self.page.dismiss_history();
                }
            }
            Action::CycleSort => {
                self.page.form_mut().cycle_sort();
                self.submit();
            }
            Action::Restart => {
                info!("Catalog filters reset");
                let ticket = self.page.reset_filters();
                self.completions.dispatch(&self.source, ticket);
            }
            Action::Retry => match self.page.retry() {
                Some(ticket) => self.completions.dispatch(&self.source, ticket),
                None => self.set_status("Nothing to retry", MessageType::Error),
            },
            Action::PrevPage | Action::NextPage | Action::None => {}
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        let form = self.page.form_mut();
        match self.focus {
            Focus::Query => Some(&mut form.query),
            Focus::PriceMin => Some(&mut form.price_min),
            Focus::PriceMax => Some(&mut form.price_max),
            Focus::Facets => None,
        }
    }

    fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Facets => {
                if c == ' ' && self.page.form_mut().toggle(self.facet_cursor) {
                    self.page.view_mut().needs_redraw = true;
                }
            }
            Focus::Query => {
                // Editing the query means a new search, not a recalled one
                self.page.dismiss_history();
                if self.page.form().query.chars().count() < MAX_QUERY_LEN {
                    self.page.form_mut().query.push(c);
                    self.page.view_mut().needs_redraw = true;
                }
            }
            Focus::PriceMin | Focus::PriceMax => {
                if c.is_ascii_digit() || c == '.' {
                    if let Some(text) = self.focused_text() {
                        text.push(c);
                    }
                    self.page.view_mut().needs_redraw = true;
                } else {
                    self.set_status("Prices take digits only", MessageType::Error);
                }
            }
        }
    }
}

/// Drop an expired status message; true when one was dropped
fn clear_expired(status: &mut Option<StatusMessage>) -> bool {
    if status.as_ref().is_some_and(|message| message.is_expired(Instant::now())) {
        *status = None;
        return true;
    }
    false
}
