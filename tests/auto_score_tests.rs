use std::collections::HashMap;

use chrono::Utc;
use imtihon::{
    CorrectAnswer, Grade, Question, QuestionId, QuestionType, ScoringMode, Submission,
    SubmissionStatus, TestDefinition, auto_score_submission,
};
use serde_json::{Value, json};
use uuid::Uuid;

fn question(kind: QuestionType, correct: &str, points: f64, sort_order: i32) -> Question {
    Question::builder()
        .id(Uuid::new_v4())
        .kind(kind)
        .points(points)
        .correct(CorrectAnswer::decode(kind, correct))
        .sort_order(sort_order)
        .build()
}

fn answers(pairs: &[(QuestionId, Value)]) -> HashMap<QuestionId, Value> {
    pairs.iter().cloned().collect()
}

#[test]
fn classic_multiple_choice_round_trip() {
    let q = question(QuestionType::MultipleChoice, "1", 1.0, 0);
    let outcome = auto_score_submission(
        &[q.clone()],
        &answers(&[(q.id, json!("1"))]),
        ScoringMode::Classic,
    );

    assert_eq!(outcome.grade.grade, 1.0);
    assert_eq!(outcome.grade.out_of, 1.0);
    assert_eq!(outcome.status, SubmissionStatus::Completed);
}

#[test]
fn essay_only_test_is_pending_regardless_of_answer() {
    let q = question(QuestionType::Essay, "", 5.0, 0);
    let outcome = auto_score_submission(
        &[q.clone()],
        &answers(&[(q.id, json!("a long essay"))]),
        ScoringMode::Classic,
    );

    assert_eq!(outcome.grade.grade, 0.0);
    assert_eq!(outcome.grade.out_of, 0.0);
    assert_eq!(outcome.status, SubmissionStatus::PendingReview);
}

#[test]
fn two_part_classic_scores_whole_point_on_equivalence() {
    let q = question(
        QuestionType::TwoPartWritten,
        r#"{"first":"bo'shang","second":"tamga"}"#,
        1.0,
        0,
    );
    let outcome = auto_score_submission(
        &[q.clone()],
        &answers(&[(q.id, json!(r#"{"first":"bo'shang","second":"tamga"}"#))]),
        ScoringMode::Classic,
    );

    assert_eq!(outcome.grade.grade, 1.0);
    assert_eq!(outcome.grade.out_of, 1.0);
    assert_eq!(outcome.status, SubmissionStatus::Completed);
}

#[test]
fn rasch_two_part_awards_partial_credit_per_component() {
    let q = question(
        QuestionType::TwoPartWritten,
        r#"{"first":"alpha","second":"beta","firstPoints":2,"secondPoints":1}"#,
        1.0,
        0,
    );
    let outcome = auto_score_submission(
        &[q.clone()],
        &answers(&[(q.id, json!(r#"{"first":"alpha","second":"wrong"}"#))]),
        ScoringMode::Rasch,
    );

    assert_eq!(outcome.grade.grade, 2.0);
    assert_eq!(outcome.grade.out_of, 3.0);
    assert_eq!(outcome.status, SubmissionStatus::PendingReview);
}

#[test]
fn rasch_mode_always_requires_review() {
    let q = question(QuestionType::MultipleChoice, "1", 1.0, 0);
    let outcome = auto_score_submission(
        &[q.clone()],
        &answers(&[(q.id, json!("1"))]),
        ScoringMode::Rasch,
    );

    assert_eq!(outcome.status, SubmissionStatus::PendingReview);
}

#[test]
fn manual_questions_are_excluded_from_both_totals() {
    let mc = question(QuestionType::MultipleChoice, "2", 1.0, 0);
    let short = question(QuestionType::ShortAnswer, "kalit", 4.0, 1);
    let outcome = auto_score_submission(
        &[mc.clone(), short.clone()],
        &answers(&[(mc.id, json!("2")), (short.id, json!("kalit"))]),
        ScoringMode::Classic,
    );

    assert_eq!(outcome.grade.grade, 1.0);
    assert_eq!(outcome.grade.out_of, 1.0);
    assert_eq!(outcome.status, SubmissionStatus::PendingReview);
}

#[test]
fn unanswered_objective_question_counts_against_the_max() {
    let first = question(QuestionType::MultipleChoice, "1", 1.0, 0);
    let second = question(QuestionType::TrueFalse, "true", 1.0, 1);
    let outcome = auto_score_submission(
        &[first.clone(), second],
        &answers(&[(first.id, json!("1"))]),
        ScoringMode::Classic,
    );

    assert_eq!(outcome.grade.grade, 1.0);
    assert_eq!(outcome.grade.out_of, 2.0);
}

#[test]
fn received_submission_completes_immediately_when_fully_automatic() {
    let q = question(QuestionType::MultipleChoice, "3", 1.0, 0);
    let test = TestDefinition::builder()
        .id(7)
        .scoring_mode(ScoringMode::Classic)
        .questions(vec![q.clone()])
        .build();

    let submission = Submission::receive(&test, answers(&[(q.id, json!("3"))]), Utc::now(), None);
    assert_eq!(submission.status, SubmissionStatus::Completed);
    assert_eq!(submission.final_score, Some(1.0));
    assert_eq!(submission.auto_score, 1.0);
    assert_eq!(submission.auto_max_score, 1.0);
}

#[test]
fn received_submission_stays_open_when_review_is_needed() {
    let q = question(QuestionType::Essay, "", 5.0, 0);
    let test = TestDefinition::builder()
        .id(7)
        .scoring_mode(ScoringMode::Classic)
        .questions(vec![q.clone()])
        .build();

    let submission =
        Submission::receive(&test, answers(&[(q.id, json!("essay text"))]), Utc::now(), None);
    assert_eq!(submission.status, SubmissionStatus::PendingReview);
    assert_eq!(submission.final_score, None);
}

#[test]
fn grade_parses_from_fraction_strings() {
    let grade = Grade::grade_from_string("7/10").expect("parse");
    assert_eq!(grade.grade, 7.0);
    assert_eq!(grade.out_of, 10.0);
    assert_eq!(grade.to_string(), "7.00/10.00");

    assert!(Grade::grade_from_string("seven/ten").is_err());
}

#[test]
fn idempotency_key_finds_the_original() {
    let q = question(QuestionType::MultipleChoice, "1", 1.0, 0);
    let test = TestDefinition::builder()
        .id(7)
        .questions(vec![q.clone()])
        .build();

    let submissions = vec![
        Submission::receive(&test, HashMap::new(), Utc::now(), Some("retry-1".into())),
        Submission::receive(&test, HashMap::new(), Utc::now(), None),
    ];

    let found = Submission::find_by_idempotency_key(&submissions, "retry-1");
    assert_eq!(found.map(|s| s.id), Some(submissions[0].id));
    assert!(Submission::find_by_idempotency_key(&submissions, "other").is_none());
}
