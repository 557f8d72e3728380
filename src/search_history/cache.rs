use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::labels::{LabelResolver, build_filter_labels};
use super::storage::HistoryStorage;
use crate::models::{FilterSelections, SearchHistoryEntry};

/// Storage key of the history list
pub const SEARCH_HISTORY_KEY: &str = "search_history";
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Form fields that never describe a filter
const INTERNAL_FIELDS: [&str; 2] = ["csrfmiddlewaretoken", "search_name"];

/// Recent catalog searches, newest first.
///
/// Invariants: at most [`MAX_HISTORY_ENTRIES`] entries, and no two entries describe
/// the same search.
pub struct SearchHistory {
    storage: Box<dyn HistoryStorage>,
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    /// Load the stored list. Missing or unreadable data gives an empty history.
    pub fn load(storage: Box<dyn HistoryStorage>) -> Self {
        let entries = match storage.read(SEARCH_HISTORY_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<SearchHistoryEntry>>(&text) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY_ENTRIES);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Stored search history is corrupted, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read search history, starting empty");
                Vec::new()
            }
        };

        debug!(count = entries.len(), "Search history loaded");
        Self { storage, entries }
    }

    /// Remember a submitted search. Returns false when the query is blank.
    pub fn record_search(
        &mut self,
        query: &str,
        selections: &FilterSelections,
        sort: &str,
        labels: &dyn LabelResolver,
    ) -> bool {
        self.record_search_at(query, selections, sort, labels, Utc::now())
    }

    pub fn record_search_at(
        &mut self,
        query: &str,
        selections: &FilterSelections,
        sort: &str,
        labels: &dyn LabelResolver,
        timestamp: DateTime<Utc>,
    ) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        let filters = clean_selections(selections);
        let sort = sort.trim();
        let entry = SearchHistoryEntry {
            query: query.to_string(),
            filter_labels: build_filter_labels(&filters, sort, labels),
            filters,
            sort: sort.to_string(),
            timestamp,
        };

        self.entries.retain(|existing| !existing.same_search(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);

        debug!(query, count = self.entries.len(), "Search recorded");
        self.persist();
        true
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize search history");
                return;
            }
        };

        if let Err(e) = self.storage.write(SEARCH_HISTORY_KEY, &json) {
            warn!(error = %e, "Failed to save search history");
        }
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SearchHistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drop internal fields, blank values and fields left without values
fn clean_selections(selections: &FilterSelections) -> FilterSelections {
    selections
        .iter()
        .filter(|(field, _)| !INTERNAL_FIELDS.contains(&field.as_str()))
        .filter_map(|(field, values)| {
            let values: BTreeSet<String> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect();
            (!values.is_empty()).then(|| (field.clone(), values))
        })
        .collect()
}
