#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The auto-scoring engine applying the policy across a submission.
pub mod auto;
/// Per-question maximum-score and correctness policy.
pub mod policy;
/// Shared grade result types.
pub mod results;

pub use auto::auto_score_submission;
pub use policy::{PartResults, is_question_correct, part_results, question_max_score};
pub use results::{AutoScoreOutcome, Grade};
