use serde::{Deserialize, Serialize};

/// Product as returned by `/api/products/public/`
///
/// Only the fields the storefront displays are kept; facet names the backend adds
/// (category, brand, species, purposes) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_nullable_string")]
    pub description: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_image")]
    pub image: Option<String>,
}

impl ProductSummary {
    /// Path of the product detail page
    pub fn detail_path(&self) -> String {
        format!("/product/{}/", self.id)
    }
}
