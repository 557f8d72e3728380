use tracing::debug;

use crate::api::ProductQuery;
use crate::error::{Result, StorefrontError};
use crate::models::{QuizAnswers, QuizStep};

/// What a selection led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Moved on to the given step
    Advanced(usize),
    /// The last step was answered; the query carries every answer
    Completed(ProductQuery),
}

/// Linear single-choice questionnaire.
///
/// Invariant: `current_step < steps.len()`, and `steps` is never empty.
#[derive(Debug, Clone)]
pub struct QuizController {
    steps: Vec<QuizStep>,
    current_step: usize,
    answers: QuizAnswers,
}

impl QuizController {
    pub fn new(steps: Vec<QuizStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(StorefrontError::EmptyQuiz);
        }
        Ok(Self { steps, current_step: 0, answers: QuizAnswers::new() })
    }

    /// Record the answer for the active step.
    ///
    /// Selections on any other step, or of a value the step does not offer, are
    /// rejected without touching the state.
    pub fn select_option(&mut self, step_index: usize, value: &str) -> Result<SelectOutcome> {
        if step_index != self.current_step {
            return Err(StorefrontError::StepMismatch {
                expected: self.current_step,
                got: step_index,
            });
        }

        let step = &self.steps[step_index];
        if step.option(value).is_none() {
            return Err(StorefrontError::UnknownOption {
                step: step_index,
                value: value.to_string(),
            });
        }

        self.answers.set(step.key, value);
        debug!(step = step_index, key = %step.key, value, "Quiz answer recorded");

        if step_index + 1 < self.steps.len() {
            self.current_step += 1;
            Ok(SelectOutcome::Advanced(self.current_step))
        } else {
            Ok(SelectOutcome::Completed(self.query()))
        }
    }

    /// Step back one question; `None` at the first step.
    ///
    /// The answer given on the left step stays recorded until it is overwritten.
    pub fn go_back(&mut self) -> Option<usize> {
        if self.current_step == 0 {
            return None;
        }
        self.current_step -= 1;
        Some(self.current_step)
    }

    pub fn reset(&mut self) {
        self.answers.clear();
        self.current_step = 0;
    }

    pub fn query(&self) -> ProductQuery {
        ProductQuery::from_answers(&self.answers)
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step(&self, index: usize) -> Option<&QuizStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[QuizStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.steps.len()
    }
}
