//! # imtihon
//!
//! A scoring and psychometric finalization engine for online test
//! submissions. It auto-scores raw answers per question kind, estimates
//! comparable abilities with a joint Rasch (1PL) fit over a test's
//! objective items, and blends the automatic, model-derived, and manually
//! graded components into one final score and status per submission.
//!
//! The engine is pure computation over plain data contracts: loading
//! questions and submissions, persisting results, authentication, and
//! transport all belong to the surrounding system.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The finalization state machine combining auto, model, and manual
/// components.
pub mod finalize;
/// For all things related to per-question scoring and auto-scoring.
pub mod grade;
/// Questions, correct-answer encodings, and test definitions.
pub mod question;
/// Joint maximum-likelihood Rasch (1PL) ability/difficulty estimation.
pub mod rasch;
/// Leaderboard construction and rendering.
pub mod report;
/// Submissions and manually entered grades.
pub mod submission;
/// Free-text answer normalization and token-level equivalence.
pub mod text;
/// Shared identifier aliases and closed enums.
pub mod types;

pub use finalize::{
    FinalizeError, ManualComponent, apply_manual_grades, finalize_submission, manual_component,
};
pub use grade::{
    AutoScoreOutcome, Grade, PartResults, auto_score_submission, is_question_correct,
    part_results, question_max_score,
};
pub use question::{CorrectAnswer, Question, TestDefinition, TwoPartKey, TwoPartResponse};
pub use rasch::{
    DEFAULT_MAX_ITERATIONS, RaschEstimate, ResponseMatrix, estimate_rasch_1pl, theta_to_score_100,
};
pub use report::{Leaderboard, LeaderboardStats, PendingEntry, RankedEntry};
pub use submission::{ManualGrade, Submission};
pub use types::{
    QuestionId, QuestionType, ScoringMode, SubmissionId, SubmissionStatus, TestId,
};
