use crate::models::ProductSummary;
use crate::utils::strip_ansi_codes;

/// Image shown when a product has none, or when its image fails to load
pub const DEFAULT_PRODUCT_IMAGE: &str = "/static/img/default-product.png";
/// Descriptions longer than this many characters are cut
pub const DESCRIPTION_LIMIT: usize = 50;
pub const NO_DESCRIPTION: &str = "No description";
pub const CURRENCY_SIGN: &str = "₽";

/// Display model of one product in a result grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub fallback_image: &'static str,
    pub link: String,
}

/// How a card shows the product price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStyle {
    /// Nearest whole ruble, as the catalog grid shows it
    Rounded,
    /// Two decimals, as the backend serializes the price
    Decimal,
}

impl ProductCard {
    pub fn new(product: &ProductSummary, style: PriceStyle) -> Self {
        let description = strip_ansi_codes(&product.description);
        let description = if description.trim().is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            truncate_description(&description)
        };

        Self {
            id: product.id,
            title: strip_ansi_codes(&product.name),
            description,
            price: format_price(product.price, style),
            image: product.image.clone().unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            fallback_image: DEFAULT_PRODUCT_IMAGE,
            link: product.detail_path(),
        }
    }
}

/// Keep the first [`DESCRIPTION_LIMIT`] characters, marking the cut with `...`
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let head: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub fn format_price(price: f64, style: PriceStyle) -> String {
    match style {
        // Half rounds up; prices are never negative
        PriceStyle::Rounded => format!("{:.0} {}", price.round(), CURRENCY_SIGN),
        PriceStyle::Decimal => format!("{:.2} {}", price, CURRENCY_SIGN),
    }
}

pub fn cards_for(products: &[ProductSummary], style: PriceStyle) -> Vec<ProductCard> {
    products.iter().map(|product| ProductCard::new(product, style)).collect()
}
