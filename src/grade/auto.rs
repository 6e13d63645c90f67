#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

use super::{
    policy::{is_question_correct, part_results, question_max_score},
    results::{AutoScoreOutcome, Grade},
};
use crate::{
    question::Question,
    types::{QuestionId, QuestionType, ScoringMode, SubmissionStatus},
};

/// Applies the scoring policy across all questions of a submission.
///
/// Manual kinds (essay, short answer) are excluded from both totals entirely
/// and force the submission into review; rasch mode always requires a
/// finalize pass because ability estimates are test-global. Rasch-mode
/// two-part questions award each component's weight independently. A fully
/// automatic classic submission completes immediately, with its auto score
/// as the final score.
pub fn auto_score_submission(
    questions: &[Question],
    answers: &HashMap<QuestionId, Value>,
    mode: ScoringMode,
) -> AutoScoreOutcome {
    let mut auto_score = 0.0;
    let mut auto_max = 0.0;
    let mut requires_manual = mode == ScoringMode::Rasch;
    let missing = Value::Null;

    for question in questions.iter().sorted_by_key(|q| q.sort_order) {
        if question.kind.is_manual() {
            requires_manual = true;
            continue;
        }

        let max_score = question_max_score(question, mode);
        auto_max += max_score;
        let raw_answer = answers.get(&question.id).unwrap_or(&missing);

        if mode == ScoringMode::Rasch && question.kind == QuestionType::TwoPartWritten {
            let parts = part_results(question, raw_answer);
            if parts.first_correct {
                auto_score += parts.first_points;
            }
            if parts.second_correct {
                auto_score += parts.second_points;
            }
        } else if is_question_correct(question, raw_answer) {
            auto_score += max_score;
        }
    }

    let status = if requires_manual {
        SubmissionStatus::PendingReview
    } else {
        SubmissionStatus::Completed
    };
    debug!(auto_score, auto_max, %status, "auto-scored submission");

    AutoScoreOutcome {
        grade: Grade::new(auto_score, auto_max),
        status,
    }
}
