#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a test, the owning container of questions and submissions.
pub type TestId = i64;

/// Identifier of a question.
pub type QuestionId = Uuid;

/// Identifier of a submission.
pub type SubmissionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The closed set of question kinds the engine understands.
///
/// Adding a kind is a compile-time-checked change: every scoring decision
/// dispatches on this enum with an exhaustive match.
pub enum QuestionType {
    /// Free-text answer graded by a human.
    #[serde(rename = "short-answer")]
    ShortAnswer,
    /// Written answer with two independently weighted components.
    #[serde(rename = "two-part-written")]
    TwoPartWritten,
    /// Single selected option compared against the stored key.
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    /// Long-form answer graded by a human.
    #[serde(rename = "essay")]
    Essay,
    /// Binary choice compared against the stored key.
    #[serde(rename = "true-false")]
    TrueFalse,
}

impl QuestionType {
    /// Returns `true` for kinds that are auto-gradable without human
    /// judgment.
    pub fn is_objective(self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::TrueFalse | Self::TwoPartWritten
        )
    }

    /// Returns `true` for kinds that require human grading.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::Essay | Self::ShortAnswer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// How a test converts responses into a final score.
pub enum ScoringMode {
    /// Points for correct answers plus manually graded components.
    #[default]
    #[serde(rename = "correct-incorrect")]
    Classic,
    /// Rasch (1PL) ability estimation blended with the manual component.
    #[serde(rename = "rasch")]
    Rasch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Lifecycle state of a submission.
pub enum SubmissionStatus {
    /// At least one component still needs human review.
    #[serde(rename = "pending_review")]
    PendingReview,
    /// A terminal decision was reached and `final_score` is set.
    #[serde(rename = "completed")]
    Completed,
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingReview => write!(f, "pending_review"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
