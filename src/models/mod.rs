//! Data models for the storefront client.
//!
//! - [`ProductSummary`] - Product card data from the public product search
//! - [`QuizAnswers`] / [`QuizKey`] - Answers collected by the product quiz
//! - [`SearchHistoryEntry`] - A remembered catalog search
//! - [`StorefrontLayout`] - Quiz questions and catalog controls
//! - [`UserSettings`] - Display preferences from the user profile
//!
//! Lenient backend fields (decimal prices sent as strings, empty image URLs) go through
//! the custom deserializers in [`crate::parsers::deserializers`].

pub mod history;
pub mod layout;
pub mod product;
pub mod profile;
pub mod quiz;

pub use history::{FilterSelections, SearchHistoryEntry};
pub use layout::{CatalogLayout, ChoiceOption, FacetGroup, QuizStep, StorefrontLayout};
pub use product::ProductSummary;
pub use profile::UserSettings;
pub use quiz::{QuizAnswers, QuizKey};
