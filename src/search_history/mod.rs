//! Recent catalog searches: the bounded de-duplicated list, its storage, badge labels
//! and the dropdown that offers them for recall.

pub mod cache;
pub mod dropdown;
pub mod labels;
pub mod storage;

pub use cache::{MAX_HISTORY_ENTRIES, SEARCH_HISTORY_KEY, SearchHistory};
pub use dropdown::{HIDE_GRACE, HistoryDropdown, NO_FILTERS_LABEL, history_items};
pub use labels::{LabelResolver, build_filter_labels};
pub use storage::{FileStorage, HistoryStorage, MemoryStorage};
