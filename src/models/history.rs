use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selected values per filter field name, as submitted by the catalog form
pub type FilterSelections = BTreeMap<String, BTreeSet<String>>;

/// One remembered catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,
    #[serde(default)]
    pub filters: FilterSelections,
    #[serde(rename = "filterLabels", default)]
    pub filter_labels: Vec<String>,
    #[serde(default)]
    pub sort: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// Two entries describe the same search when query, filters and sort all match.
    /// Labels and timestamp are derived data and do not take part.
    pub fn same_search(&self, other: &SearchHistoryEntry) -> bool {
        self.query == other.query && self.filters == other.filters && self.sort == other.sort
    }

    pub fn has_filters(&self) -> bool {
        !self.filter_labels.is_empty()
    }
}
