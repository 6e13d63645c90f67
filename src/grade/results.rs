#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::SubmissionStatus;

#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
/// A struct representing a grade
pub struct Grade {
    /// The actual grade received
    pub grade:  f64,
    /// The maximum grade possible
    pub out_of: f64,
}

impl Grade {
    /// Creates a new grade -
    /// * `grade` - The actual grade received
    /// * `out_of` - The maximum grade possible
    pub fn new(grade: f64, out_of: f64) -> Self {
        Self { grade, out_of }
    }

    /// Creates a new grade from a string -
    /// * `grade_string` - A string in the format `grade/out_of`, eg. `10/20`
    pub fn grade_from_string(grade_string: &str) -> Result<Grade> {
        let (grade, out_of) = grade_string.split_once('/').unwrap_or(("0", "0"));
        Ok(Grade::new(
            grade.parse::<f64>().context("Failed to parse grade")?,
            out_of.parse::<f64>().context("Failed to parse out of")?,
        ))
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}/{:.2}", self.grade, self.out_of)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The outcome of auto-scoring one submission.
pub struct AutoScoreOutcome {
    /// Points achieved and attainable across the auto-scorable questions.
    pub grade:  Grade,
    /// Whether the submission completed automatically or still needs human
    /// review.
    pub status: SubmissionStatus,
}

impl AutoScoreOutcome {
    /// Returns `true` when no human review is needed and the auto score is
    /// already the final score.
    pub fn is_final(&self) -> bool {
        self.status == SubmissionStatus::Completed
    }
}
