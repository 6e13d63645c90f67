use std::collections::HashMap;

use chrono::{Duration, Utc};
use imtihon::{Leaderboard, Submission, SubmissionStatus};
use uuid::Uuid;

fn submission(
    final_score: Option<f64>,
    status: SubmissionStatus,
    submitted_offset_secs: i64,
) -> Submission {
    Submission::builder()
        .id(Uuid::new_v4())
        .test_id(1)
        .answers(HashMap::new())
        .maybe_final_score(final_score)
        .status(status)
        .submitted_at(Utc::now() + Duration::seconds(submitted_offset_secs))
        .build()
}

#[test]
fn completed_submissions_rank_by_score_descending() {
    let submissions = vec![
        submission(Some(40.0), SubmissionStatus::Completed, 0),
        submission(Some(90.0), SubmissionStatus::Completed, 1),
        submission(Some(65.0), SubmissionStatus::Completed, 2),
    ];

    let board = Leaderboard::for_test(&submissions);
    let scores: Vec<f64> = board.ranked.iter().map(|e| e.final_score).collect();
    assert_eq!(scores, vec![90.0, 65.0, 40.0]);
}

#[test]
fn ties_break_by_earlier_submission() {
    let early = submission(Some(70.0), SubmissionStatus::Completed, 0);
    let late = submission(Some(70.0), SubmissionStatus::Completed, 60);
    let board = Leaderboard::for_test(&[late.clone(), early.clone()]);

    assert_eq!(board.ranked[0].submission_id, early.id);
    assert_eq!(board.ranked[1].submission_id, late.id);
}

#[test]
fn pending_submissions_list_newest_first() {
    let older = submission(None, SubmissionStatus::PendingReview, 0);
    let newer = submission(None, SubmissionStatus::PendingReview, 120);
    let board = Leaderboard::for_test(&[older.clone(), newer.clone()]);

    assert!(board.ranked.is_empty());
    assert_eq!(board.pending[0].submission_id, newer.id);
    assert_eq!(board.pending[1].submission_id, older.id);
}

#[test]
fn stats_count_both_partitions() {
    let submissions = vec![
        submission(Some(80.0), SubmissionStatus::Completed, 0),
        submission(None, SubmissionStatus::PendingReview, 1),
        submission(None, SubmissionStatus::PendingReview, 2),
    ];

    let stats = Leaderboard::for_test(&submissions).stats();
    assert_eq!(stats.ranked, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.total, 3);
}

#[test]
fn rendering_includes_the_header_and_footer() {
    let submissions = vec![submission(Some(80.0), SubmissionStatus::Completed, 0)];
    let rendered = Leaderboard::for_test(&submissions).to_string();

    assert!(rendered.contains("Leaderboard"));
    assert!(rendered.contains("Ranked: 1"));
}
