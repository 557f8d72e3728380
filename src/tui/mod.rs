// TUI module for the interactive quiz and catalog pages
mod app;
mod events;
mod layout;
mod rendering;
mod screens;
mod terminal;

use anyhow::Result;
pub use app::{CatalogApp, QuizApp};
pub use screens::{CatalogScreen, QuizScreen, ResultsPanel, ResultsState};
use terminal::TerminalManager;
use tracing::info;

use crate::api::SharedSource;
use crate::models::{CatalogLayout, QuizStep};
use crate::search_history::SearchHistory;

/// Run the product quiz until the user quits
pub fn run_quiz(steps: Vec<QuizStep>, source: SharedSource) -> Result<()> {
    let mut app = QuizApp::new(steps, source)?;

    let mut manager = TerminalManager::new()?;
    info!("Quiz page opened");
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}

/// Run the catalog page until the user quits
pub fn run_catalog(
    layout: &CatalogLayout,
    history: SearchHistory,
    source: SharedSource,
) -> Result<()> {
    let mut app = CatalogApp::new(layout, history, source);

    let mut manager = TerminalManager::new()?;
    info!("Catalog page opened");
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
