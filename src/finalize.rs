#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The finalization state machine.
//!
//! Combines manual grading completeness, the Rasch estimate (when the test's
//! mode requires it), and the auto-scoring result into one final score and
//! status per submission. Rasch-mode finalization is deliberately a
//! whole-test operation: ability estimates are test-global and shift
//! whenever the response matrix changes, so a single submission's finalize
//! rewrites the derived state of every submission of its test. Callers must
//! hand the operation a consistent snapshot of the test's submissions and
//! serialize concurrent finalizes per test.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::{
    grade::is_question_correct,
    question::TestDefinition,
    rasch::{DEFAULT_MAX_ITERATIONS, ResponseMatrix, estimate_rasch_1pl, theta_to_score_100},
    submission::{ManualGrade, Submission},
    types::{QuestionId, ScoringMode, SubmissionId, SubmissionStatus, TestId},
};

/// Decimal precision kept on blended rasch final scores.
const ROUND_FACTOR: f64 = 10_000.0;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced to callers of the finalization operations.
pub enum FinalizeError {
    /// The referenced submission does not belong to the given test.
    #[error("Submission `{submission_id}` was not found on test `{test_id}`.")]
    SubmissionNotFound {
        /// Submission the caller referenced.
        submission_id: SubmissionId,
        /// Test the operation was scoped to.
        test_id:       TestId,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Aggregated manual grading state for one submission.
pub struct ManualComponent {
    /// Clamped sum of the entered grades.
    pub total:      f64,
    /// Sum of per-question maxima over all manual questions.
    pub max:        f64,
    /// Whether every manual question has a grade.
    pub all_graded: bool,
}

/// Aggregates the manual component of a submission.
///
/// Each manual question contributes `points.max(1.0)` to the maximum; an
/// entered grade is clamped into `[0, max]` before summing, and a question
/// with no grade yet contributes nothing and marks the submission as not
/// fully graded. A test with no manual questions reports `(0, 0, true)`.
pub fn manual_component(submission: &Submission, test: &TestDefinition) -> ManualComponent {
    let manual_questions = test.manual_questions();
    if manual_questions.is_empty() {
        return ManualComponent {
            total:      0.0,
            max:        0.0,
            all_graded: true,
        };
    }

    let mut component = ManualComponent {
        all_graded: true,
        ..ManualComponent::default()
    };
    for question in manual_questions {
        let max_points = question.points.max(1.0);
        component.max += max_points;
        match submission.manual_grade(question.id) {
            Some(grade) => component.total += grade.score.clamp(0.0, max_points),
            None => component.all_graded = false,
        }
    }
    component
}

/// Upserts manually entered grades on one submission of a test.
///
/// Scores are floored at zero on entry; clamping to each question's maximum
/// happens at aggregation time, so an oversized grade is stored as entered
/// but never inflates the manual total. Referencing a submission outside the
/// test is a not-found error.
pub fn apply_manual_grades(
    test: &TestDefinition,
    submissions: &mut [Submission],
    submission_id: SubmissionId,
    grader: Uuid,
    grades: &HashMap<QuestionId, f64>,
) -> Result<(), FinalizeError> {
    let index = position_in_test(test, submissions, submission_id)?;
    let submission = &mut submissions[index];
    let now = Utc::now();

    for (&question_id, &score) in grades {
        let bounded = score.max(0.0);
        match submission
            .manual_grades
            .iter_mut()
            .find(|grade| grade.question_id == question_id)
        {
            Some(existing) => {
                existing.score = bounded;
                existing.graded_by = grader;
                existing.graded_at = now;
            }
            None => submission.manual_grades.push(ManualGrade {
                question_id,
                score: bounded,
                graded_by: grader,
                graded_at: now,
            }),
        }
    }
    Ok(())
}

/// Finalizes a submission of a test.
///
/// Classic mode touches only the triggering submission: its final score is
/// the auto score plus the clamped manual total, and it completes
/// unconditionally. Rasch mode recomputes the entire test (see the module
/// docs); the optional override applies to the triggering submission only.
/// Validation happens before any mutation, so the call either fully
/// succeeds or fully fails, and re-running it with unchanged answers and
/// grades reproduces the same final scores.
pub fn finalize_submission(
    test: &TestDefinition,
    submissions: &mut [Submission],
    submission_id: SubmissionId,
    reviewer: Uuid,
    override_score: Option<f64>,
) -> Result<(), FinalizeError> {
    let index = position_in_test(test, submissions, submission_id)?;
    info!(
        test_id = test.id,
        %submission_id,
        mode = ?test.scoring_mode,
        "finalizing submission"
    );

    match test.scoring_mode {
        ScoringMode::Rasch => {
            finalize_rasch_test(test, submissions, submission_id, reviewer, override_score);
        }
        ScoringMode::Classic => {
            let now = Utc::now();
            let manual = manual_component(&submissions[index], test);
            let submission = &mut submissions[index];
            submission.final_score = Some(submission.auto_score + manual.total);
            submission.status = SubmissionStatus::Completed;
            stamp_review(submission, reviewer, now);
        }
    }
    Ok(())
}

/// Locates a submission within the given test, or reports not-found.
fn position_in_test(
    test: &TestDefinition,
    submissions: &[Submission],
    submission_id: SubmissionId,
) -> Result<usize, FinalizeError> {
    submissions
        .iter()
        .position(|s| s.id == submission_id && s.test_id == test.id)
        .ok_or(FinalizeError::SubmissionNotFound {
            submission_id,
            test_id: test.id,
        })
}

/// Records the reviewer and decision time on a completed submission.
fn stamp_review(submission: &mut Submission, reviewer: Uuid, now: DateTime<Utc>) {
    submission.reviewed_at = Some(now);
    submission.reviewed_by = Some(reviewer);
}

/// Writes a freshly computed decision onto a submission.
///
/// The final score is recorded either way; the status is terminal only once
/// every manual question is graded, and review metadata is stamped only on
/// completion.
fn record_decision(
    submission: &mut Submission,
    final_score: f64,
    all_graded: bool,
    reviewer: Uuid,
    now: DateTime<Utc>,
) {
    submission.final_score = Some(final_score);
    submission.status = if all_graded {
        SubmissionStatus::Completed
    } else {
        SubmissionStatus::PendingReview
    };
    if submission.status == SubmissionStatus::Completed {
        stamp_review(submission, reviewer, now);
    }
}

/// Rounds a blended score to four decimal places.
fn round_score(score: f64) -> f64 {
    (score * ROUND_FACTOR).round() / ROUND_FACTOR
}

/// Recomputes the final score and status of every submission of a
/// rasch-mode test.
fn finalize_rasch_test(
    test: &TestDefinition,
    submissions: &mut [Submission],
    triggering: SubmissionId,
    reviewer: Uuid,
    override_score: Option<f64>,
) {
    let now = Utc::now();
    let objective = test.objective_questions();

    if objective.is_empty() {
        // Nothing to estimate: the manual total is the whole score.
        for submission in submissions.iter_mut() {
            let manual = manual_component(submission, test);
            record_decision(submission, manual.total, manual.all_graded, reviewer, now);
        }
        return;
    }

    let item_ids: Vec<QuestionId> = objective.iter().map(|q| q.id).collect();
    let submission_ids: Vec<SubmissionId> = submissions.iter().map(|s| s.id).collect();
    let missing = Value::Null;
    let matrix: ResponseMatrix = submissions
        .iter()
        .map(|submission| {
            objective
                .iter()
                .map(|question| {
                    let raw = submission.answers.get(&question.id).unwrap_or(&missing);
                    is_question_correct(question, raw)
                })
                .collect()
        })
        .collect();

    let estimate = estimate_rasch_1pl(&submission_ids, &item_ids, &matrix, DEFAULT_MAX_ITERATIONS);

    let objective_points: f64 = objective.iter().map(|q| q.points.max(1.0)).sum();
    let manual_points: f64 = test
        .manual_questions()
        .iter()
        .map(|q| q.points.max(1.0))
        .sum();
    let total_points = objective_points + manual_points;
    let objective_weight = if total_points > 0.0 {
        objective_points / total_points
    } else {
        1.0
    };
    let manual_weight = 1.0 - objective_weight;

    for submission in submissions.iter_mut() {
        let theta = estimate
            .theta_by_submission
            .get(&submission.id)
            .copied()
            .unwrap_or(0.0);
        let rasch_score = theta_to_score_100(theta);
        let manual = manual_component(submission, test);
        let manual_percent = if manual.max > 0.0 {
            manual.total / manual.max * 100.0
        } else {
            0.0
        };

        let composite = rasch_score * objective_weight + manual_percent * manual_weight;
        record_decision(
            submission,
            round_score(composite),
            manual.all_graded,
            reviewer,
            now,
        );
    }

    if let Some(score) = override_score
        && let Some(submission) = submissions.iter_mut().find(|s| s.id == triggering)
    {
        submission.final_score = Some(score.max(0.0));
        submission.status = SubmissionStatus::Completed;
        stamp_review(submission, reviewer, now);
    }
}
