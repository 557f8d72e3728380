use serde_json::Value;
use tracing::warn;

use crate::models::ProductSummary;

/// Parse a product search body.
///
/// Anything that is not a JSON array reads as no products. Array items that do not look
/// like a product are skipped with a warning instead of failing the whole list.
pub fn parse_product_list(body: &str) -> Vec<ProductSummary> {
    let items = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Product search returned a non-array body, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Product search returned malformed JSON, treating as empty");
            return Vec::new();
        }
    };

    let total = items.len();
    let products: Vec<ProductSummary> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<ProductSummary>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index = idx, error = %e, "Skipping malformed product");
                None
            }
        })
        .collect();

    if products.len() < total {
        warn!(parsed = products.len(), total, "Some products could not be parsed");
    }

    products
}
