#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde_json::Value;

use crate::{
    question::{Question, TwoPartResponse},
    text::equivalent,
    types::{QuestionType, ScoringMode},
};

/// Renders a raw answer value as the text it compares as.
///
/// Answers arrive as text or numbers; a missing answer compares as the empty
/// string rather than a literal `null`.
fn answer_text(raw: &Value) -> String {
    match raw {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Returns the maximum score attainable on a question under the given mode.
///
/// Short answers are never auto-scored (they always route to manual review),
/// so their auto maximum is zero; the manual component prices them at
/// `points.max(1.0)` instead.
pub fn question_max_score(question: &Question, mode: ScoringMode) -> f64 {
    match question.kind {
        QuestionType::TwoPartWritten => match mode {
            ScoringMode::Classic => 1.0,
            ScoringMode::Rasch => {
                let key = question.two_part_key();
                key.first_points + key.second_points
            }
        },
        QuestionType::Essay => question.points.max(1.0),
        _ if mode == ScoringMode::Rasch => question.points.max(1.0),
        QuestionType::MultipleChoice | QuestionType::TrueFalse => 1.0,
        QuestionType::ShortAnswer => 0.0,
    }
}

/// Decides whether a raw answer is correct for a question.
///
/// Two-part questions compare both components through the token matcher, so
/// cosmetic punctuation and casing differences are forgiven. Every other
/// auto-scorable kind compares the stringified answer against the stored
/// canonical text exactly, with no normalization.
pub fn is_question_correct(question: &Question, raw_answer: &Value) -> bool {
    match question.kind {
        QuestionType::TwoPartWritten => {
            let key = question.two_part_key();
            let response = TwoPartResponse::decode(raw_answer);
            equivalent(&response.first, &key.first) && equivalent(&response.second, &key.second)
        }
        _ => answer_text(raw_answer) == question.correct.plain_text(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Per-component correctness and weights for a two-part question.
pub struct PartResults {
    /// Whether the first component matched the key.
    pub first_correct:  bool,
    /// Whether the second component matched the key.
    pub second_correct: bool,
    /// Weight awarded for a correct first component.
    pub first_points:   f64,
    /// Weight awarded for a correct second component.
    pub second_points:  f64,
}

/// Evaluates both components of a two-part answer independently.
///
/// Used by rasch-mode auto-scoring to award partial credit per sub-answer.
pub fn part_results(question: &Question, raw_answer: &Value) -> PartResults {
    let key = question.two_part_key();
    let response = TwoPartResponse::decode(raw_answer);
    PartResults {
        first_correct:  equivalent(&response.first, &key.first),
        second_correct: equivalent(&response.second, &key.second),
        first_points:   key.first_points,
        second_points:  key.second_points,
    }
}
