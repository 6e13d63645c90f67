#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

use crate::{
    submission::Submission,
    types::{SubmissionId, SubmissionStatus},
};

#[derive(Tabled, Clone, Debug)]
/// One ranked row of a leaderboard.
pub struct RankedEntry {
    #[tabled(rename = "Submission")]
    /// Submission identifier.
    pub submission_id: SubmissionId,
    #[tabled(rename = "Final score")]
    /// Final score the submission was completed with.
    pub final_score:   f64,
    #[tabled(rename = "Submitted at")]
    /// When the submission was received.
    pub submitted_at:  DateTime<Utc>,
}

#[derive(Tabled, Clone, Debug)]
/// One not-yet-terminal row of a leaderboard.
pub struct PendingEntry {
    #[tabled(rename = "Submission")]
    /// Submission identifier.
    pub submission_id: SubmissionId,
    #[tabled(rename = "Status")]
    /// Current lifecycle state.
    pub status:        SubmissionStatus,
    #[tabled(rename = "Submitted at")]
    /// When the submission was received.
    pub submitted_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Row counts summarizing a leaderboard.
pub struct LeaderboardStats {
    /// Completed submissions with a final score.
    pub ranked:  usize,
    /// Submissions still awaiting review.
    pub pending: usize,
    /// All submissions of the test.
    pub total:   usize,
}

#[derive(Debug, Clone, Default)]
/// A ranked view over one test's submissions.
pub struct Leaderboard {
    /// Completed submissions, best score first.
    pub ranked:  Vec<RankedEntry>,
    /// Submissions awaiting review, newest first.
    pub pending: Vec<PendingEntry>,
}

impl Leaderboard {
    /// Builds the leaderboard for a test's submissions.
    ///
    /// Completed submissions with a final score rank by score descending,
    /// ties broken by earlier submission time; everything else lists as
    /// pending, newest first.
    pub fn for_test(submissions: &[Submission]) -> Self {
        let ranked = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Completed && s.final_score.is_some())
            .sorted_by(|a, b| {
                b.final_score
                    .unwrap_or(0.0)
                    .total_cmp(&a.final_score.unwrap_or(0.0))
                    .then_with(|| a.submitted_at.cmp(&b.submitted_at))
            })
            .map(|s| RankedEntry {
                submission_id: s.id,
                final_score:   s.final_score.unwrap_or(0.0),
                submitted_at:  s.submitted_at,
            })
            .collect();

        let pending = submissions
            .iter()
            .filter(|s| s.status != SubmissionStatus::Completed)
            .sorted_by(|a, b| b.submitted_at.cmp(&a.submitted_at))
            .map(|s| PendingEntry {
                submission_id: s.id,
                status:        s.status,
                submitted_at:  s.submitted_at,
            })
            .collect();

        Self { ranked, pending }
    }

    /// Returns the row counts for this leaderboard.
    pub fn stats(&self) -> LeaderboardStats {
        LeaderboardStats {
            ranked:  self.ranked.len(),
            pending: self.pending.len(),
            total:   self.ranked.len() + self.pending.len(),
        }
    }
}

impl Display for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        let table = Table::new(&self.ranked)
            .with(Panel::header("Leaderboard"))
            .with(Panel::footer(format!(
                "Ranked: {}  Pending: {}  Total: {}",
                stats.ranked, stats.pending, stats.total
            )))
            .with(Style::modern())
            .to_string();
        write!(f, "{table}")
    }
}
