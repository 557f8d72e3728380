//! Catalog browsing: the filter form and the page that submits it

pub mod form;
pub mod page;

pub use form::{FacetControl, FilterForm};
pub use page::CatalogPage;
