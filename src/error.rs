//! Error types for the storefront library.
//!
//! Network failures have their own taxonomy in [`crate::api::FetchError`] because they
//! end at the page boundary and are rendered, never propagated.

#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("config error: {0}")]
    Config(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("quiz has no steps")]
    EmptyQuiz,

    #[error("step {got} is not the active step (active: {expected})")]
    StepMismatch { expected: usize, got: usize },

    #[error("unknown option '{value}' for step {step}")]
    UnknownOption { step: usize, value: String },

    #[error("unknown quiz key: '{0}' (valid keys: species, age, category, type, purpose)")]
    UnknownQuizKey(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
