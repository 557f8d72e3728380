use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::debug;

use super::client::ProductSource;
use super::error::FetchError;
use super::generation::Generation;
use super::query::ProductQuery;
use crate::models::ProductSummary;

/// Result of a background search, tagged with the request it answers
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: Generation,
    pub result: Result<Vec<ProductSummary>, FetchError>,
}

/// Shared handle to a product source usable from worker threads
pub type SharedSource = Arc<dyn ProductSource + Send + Sync>;

/// Run one product search on a worker thread and send the completion back.
///
/// The receiver decides whether the completion is still current.
pub fn spawn_search(
    source: SharedSource,
    generation: Generation,
    query: ProductQuery,
    completions: Sender<FetchCompletion>,
) {
    thread::spawn(move || {
        let result = source.search_products(&query);
        // Receiver gone means the page closed; nothing left to update
        if completions.send(FetchCompletion { generation, result }).is_err() {
            debug!(generation = generation.value(), "Dropping completion, page closed");
        }
    });
}
