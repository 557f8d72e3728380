//! Pet Shop Storefront - terminal client for the pet shop's public catalog
//!
//! This library holds the presentation logic of the storefront pages, with the screen
//! behind small view traits. It supports:
//!
//! - A product-discovery quiz that turns answers into one filtered product search
//! - Paginated result rendering, three cards per page
//! - A persisted, de-duplicated history of the last ten catalog searches
//! - Date formatting in the layout chosen in the user profile
//!
//! # Example
//!
//! ```
//! use petshop_storefront::models::ProductSummary;
//! use petshop_storefront::results::ResultPaginator;
//!
//! let products: Vec<ProductSummary> = (1..=5)
//!     .map(|id| ProductSummary {
//!         id,
//!         name: format!("Toy {}", id),
//!         description: String::new(),
//!         price: 150.0,
//!         image: None,
//!     })
//!     .collect();
//!
//! let mut paginator = ResultPaginator::new();
//! paginator.replace(products);
//! let page = paginator.render(1);
//! assert_eq!(page.items.len(), 2);
//! assert!(page.nav.next_disabled);
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod quiz;
pub mod results;
pub mod search_history;
pub mod tui;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use api::{FetchError, ProductQuery, ProductSource, StorefrontClient};
pub use config::Config;
pub use error::{Result, StorefrontError};
pub use quiz::{QuizController, QuizPage};
pub use results::ResultPaginator;
pub use search_history::SearchHistory;
pub use utils::{DatePattern, format_date};
