#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    grade::auto_score_submission,
    question::TestDefinition,
    types::{QuestionId, SubmissionId, SubmissionStatus, TestId},
};

#[derive(Debug, Clone, Builder)]
/// A manually entered grade for one question of one submission.
///
/// At most one grade exists per (submission, question) pair. The score is
/// floored at zero when entered and clamped to the question's maximum when
/// aggregated.
pub struct ManualGrade {
    /// Question the grade applies to.
    pub question_id: QuestionId,
    /// Score as entered.
    pub score:       f64,
    /// Grader who entered the score.
    pub graded_by:   Uuid,
    /// When the grade was entered.
    pub graded_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Builder)]
/// One participant's submission to a test.
///
/// The auto fields are computed once when the submission is received and are
/// never mutated afterwards except by the finalizer, which may rewrite
/// `final_score`, `status`, and the review metadata of every submission of a
/// test on each finalize pass.
pub struct Submission {
    /// Submission identifier.
    pub id:              SubmissionId,
    /// Test the submission belongs to.
    pub test_id:         TestId,
    /// Raw answers keyed by question identifier.
    #[builder(default)]
    pub answers:         HashMap<QuestionId, Value>,
    /// Points achieved across auto-scorable questions.
    #[builder(default)]
    pub auto_score:      f64,
    /// Points attainable across auto-scorable questions.
    #[builder(default)]
    pub auto_max_score:  f64,
    /// Final score, set once a terminal decision is reached.
    pub final_score:     Option<f64>,
    /// Lifecycle state. `Completed` implies `final_score` is set.
    #[builder(default = SubmissionStatus::PendingReview)]
    pub status:          SubmissionStatus,
    /// Manually entered grades, at most one per question.
    #[builder(default)]
    pub manual_grades:   Vec<ManualGrade>,
    /// When the submission was received.
    pub submitted_at:    DateTime<Utc>,
    /// When the last terminal decision was recorded.
    pub reviewed_at:     Option<DateTime<Utc>>,
    /// Reviewer who triggered the last terminal decision.
    pub reviewed_by:     Option<Uuid>,
    /// Caller-supplied token for idempotent creation.
    pub idempotency_key: Option<String>,
}

impl Submission {
    /// Receives a new submission for a test, computing the auto-score fields
    /// once at creation.
    ///
    /// A fully automatic submission (classic mode, no manual questions)
    /// completes immediately with its auto score as the final score and
    /// never needs a separate finalize step.
    pub fn receive(
        test: &TestDefinition,
        answers: HashMap<QuestionId, Value>,
        submitted_at: DateTime<Utc>,
        idempotency_key: Option<String>,
    ) -> Self {
        let outcome = auto_score_submission(&test.questions, &answers, test.scoring_mode);
        let final_score = outcome.is_final().then_some(outcome.grade.grade);

        Self {
            id: Uuid::new_v4(),
            test_id: test.id,
            answers,
            auto_score: outcome.grade.grade,
            auto_max_score: outcome.grade.out_of,
            final_score,
            status: outcome.status,
            manual_grades: Vec::new(),
            submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            idempotency_key,
        }
    }

    /// Returns the manual grade recorded for a question, if any.
    pub fn manual_grade(&self, question_id: QuestionId) -> Option<&ManualGrade> {
        self.manual_grades
            .iter()
            .find(|grade| grade.question_id == question_id)
    }

    /// Finds a previously received submission carrying the same idempotency
    /// token, so a retried create can return the original instead of
    /// recording a duplicate.
    pub fn find_by_idempotency_key<'a>(
        submissions: &'a [Submission],
        key: &str,
    ) -> Option<&'a Submission> {
        submissions
            .iter()
            .find(|s| s.idempotency_key.as_deref() == Some(key))
    }
}
