//! Parsers for JSON coming from the backend and from local files
//!
//! # Error Handling Strategy
//!
//! - **Backend payloads**: lenient field deserializers accept the shapes the API actually
//!   sends (decimal strings, empty image URLs, null descriptions) so one odd field does
//!   not turn a product list into an error.
//!
//! - **Layout files**: strict. A layout the quiz cannot run with is rejected up front with
//!   [`crate::error::StorefrontError::Layout`].

pub mod deserializers;
pub mod layout;
pub mod products;

pub use layout::{load_layout, parse_layout};
pub use products::parse_product_list;
