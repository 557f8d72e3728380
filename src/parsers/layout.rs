use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StorefrontError};
use crate::models::StorefrontLayout;

/// Load a storefront layout from a JSON file.
///
/// The quiz must have at least one step and every step at least one option; catalog
/// facets with no options are dropped.
pub fn load_layout(path: &Path) -> Result<StorefrontLayout> {
    let content = fs::read_to_string(path).map_err(|e| {
        StorefrontError::Layout(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_layout(&content)
}

/// Parse and validate layout JSON
pub fn parse_layout(content: &str) -> Result<StorefrontLayout> {
    let mut layout: StorefrontLayout = serde_json::from_str(content)
        .map_err(|e| StorefrontError::Layout(format!("invalid layout JSON: {}", e)))?;

    if layout.quiz.is_empty() {
        return Err(StorefrontError::EmptyQuiz);
    }

    if let Some(step) = layout.quiz.iter().find(|step| step.options.is_empty()) {
        return Err(StorefrontError::Layout(format!("quiz step '{}' has no options", step.key)));
    }

    let before = layout.catalog.facets.len();
    layout.catalog.facets.retain(|group| !group.options.is_empty());
    if layout.catalog.facets.len() != before {
        debug!(dropped = before - layout.catalog.facets.len(), "Dropped empty facet groups");
    }

    Ok(layout)
}
