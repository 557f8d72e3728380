//! Product-discovery quiz: the questionnaire state machine and the page around it

pub mod controller;
pub mod page;

pub use controller::{QuizController, SelectOutcome};
pub use page::{FetchTicket, QuizPage};
