#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{QuestionId, QuestionType, ScoringMode, TestId};

/// Weight assumed for a two-part component when the stored payload omits it
/// or carries a non-positive value.
const DEFAULT_PART_POINTS: f64 = 1.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Wire shape of a stored two-part key before weight normalization.
struct RawTwoPartKey {
    /// Expected first component, as authored.
    first: String,
    /// Expected second component, as authored.
    second: String,
    /// Weight of the first component, if present.
    first_points: Option<f64>,
    /// Weight of the second component, if present.
    second_points: Option<f64>,
}

/// Normalizes an optional stored weight to a positive value.
fn normalize_points(value: Option<f64>) -> f64 {
    match value {
        Some(points) if points > 0.0 => points,
        _ => DEFAULT_PART_POINTS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// The canonical key of a two-part written question.
///
/// Always resolves to exactly two sub-answers and two positive weights; a
/// malformed stored payload decodes to empty components with default
/// weights.
pub struct TwoPartKey {
    /// Expected first component.
    pub first: String,
    /// Expected second component.
    pub second: String,
    /// Weight awarded for a correct first component.
    pub first_points: f64,
    /// Weight awarded for a correct second component.
    pub second_points: f64,
}

impl Default for TwoPartKey {
    fn default() -> Self {
        Self {
            first: String::new(),
            second: String::new(),
            first_points: DEFAULT_PART_POINTS,
            second_points: DEFAULT_PART_POINTS,
        }
    }
}

impl TwoPartKey {
    /// Decodes a stored key payload, treating unparsable JSON as empty
    /// components and normalizing missing or non-positive weights.
    pub fn decode(encoded: &str) -> Self {
        let raw: RawTwoPartKey = serde_json::from_str(encoded).unwrap_or_default();
        Self {
            first: raw.first,
            second: raw.second,
            first_points: normalize_points(raw.first_points),
            second_points: normalize_points(raw.second_points),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// A participant's answer to a two-part question.
pub struct TwoPartResponse {
    /// First component as written.
    pub first: String,
    /// Second component as written.
    pub second: String,
}

impl TwoPartResponse {
    /// Decodes a raw answer value.
    ///
    /// Accepts either the JSON-encoded text form or an already-structured
    /// object; anything malformed or missing decodes to empty components and
    /// is simply graded wrong, never an error.
    pub fn decode(raw: &Value) -> Self {
        match raw {
            Value::String(text) => serde_json::from_str(text).unwrap_or_default(),
            Value::Object(_) => serde_json::from_value(raw.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// The canonical correct-answer encoding of a question, decoded once at the
/// boundary instead of carried around as opaque text.
pub enum CorrectAnswer {
    /// Plain canonical text, compared by exact string equality.
    Plain(String),
    /// Two independently weighted written components, compared token-wise.
    TwoPart(TwoPartKey),
}

impl CorrectAnswer {
    /// Decodes the stored encoding for the given question kind.
    pub fn decode(kind: QuestionType, encoded: &str) -> Self {
        match kind {
            QuestionType::TwoPartWritten => Self::TwoPart(TwoPartKey::decode(encoded)),
            _ => Self::Plain(encoded.to_string()),
        }
    }

    /// Returns the plain canonical text; two-part keys have none.
    pub fn plain_text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::TwoPart(_) => "",
        }
    }
}

#[derive(Debug, Clone, Builder)]
/// A single question of a test, with its correct answer already decoded.
pub struct Question {
    /// Question identifier.
    pub id: QuestionId,
    /// Question kind.
    pub kind: QuestionType,
    /// Point value of the question.
    #[builder(default = 1.0)]
    pub points: f64,
    /// Decoded canonical correct answer.
    pub correct: CorrectAnswer,
    /// Position of the question within its test.
    #[builder(default)]
    pub sort_order: i32,
}

impl Question {
    /// Returns the decoded two-part key for this question.
    ///
    /// A question stored without one resolves to empty components with
    /// default weights, matching the decode behavior for malformed payloads.
    pub fn two_part_key(&self) -> TwoPartKey {
        match &self.correct {
            CorrectAnswer::TwoPart(key) => key.clone(),
            CorrectAnswer::Plain(_) => TwoPartKey::default(),
        }
    }
}

#[derive(Debug, Clone, Builder)]
/// The scoring-relevant view of a test: its mode and its questions.
pub struct TestDefinition {
    /// Test identifier.
    pub id: TestId,
    /// Scoring mode applied to every submission of the test.
    #[builder(default)]
    pub scoring_mode: ScoringMode,
    /// Questions of the test.
    pub questions: Vec<Question>,
}

impl TestDefinition {
    /// All questions in ascending sort order.
    pub fn sorted_questions(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .sorted_by_key(|q| q.sort_order)
            .collect()
    }

    /// Questions auto-gradable without human judgment, in ascending sort
    /// order.
    pub fn objective_questions(&self) -> Vec<&Question> {
        self.sorted_questions()
            .into_iter()
            .filter(|q| q.kind.is_objective())
            .collect()
    }

    /// Questions requiring human grading, in ascending sort order.
    pub fn manual_questions(&self) -> Vec<&Question> {
        self.sorted_questions()
            .into_iter()
            .filter(|q| q.kind.is_manual())
            .collect()
    }
}
