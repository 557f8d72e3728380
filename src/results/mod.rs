//! Product result display: card models and the quiz result paginator

pub mod card;
pub mod paginator;

pub use card::{
    DEFAULT_PRODUCT_IMAGE, PriceStyle, ProductCard, cards_for, format_price, truncate_description,
};
pub use paginator::{PAGE_SIZE, PageSlice, ResultPaginator};
