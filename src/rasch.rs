#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Joint maximum-likelihood Rasch (1PL) estimation.
//!
//! Given a binary response matrix over submissions and objective items, the
//! estimator fits one latent ability per submission and one difficulty per
//! item. The fit is joint, not marginal: extreme all-correct or
//! all-incorrect patterns stop moving once their Hessian vanishes, which is
//! an accepted bias of the method, not something to correct for here.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{QuestionId, SubmissionId};

/// Newton-Raphson passes run by default.
///
/// The pass count is fixed rather than convergence-checked so output is
/// deterministic for a given matrix; callers can raise or lower it through
/// [`estimate_rasch_1pl`].
pub const DEFAULT_MAX_ITERATIONS: usize = 40;

/// Additive smoothing used by the PROX starting estimates.
const PROX_ADJUSTMENT: f64 = 0.3;

/// Keeps proportion-correct away from the logit asymptotes.
const PROPORTION_EPSILON: f64 = 1e-6;

/// Threshold below which a Newton step is skipped as degenerate.
const HESSIAN_FLOOR: f64 = 1e-9;

/// A binary response matrix: one row per submission, one column per item,
/// `true` for a correct response.
pub type ResponseMatrix = Vec<Vec<bool>>;

#[derive(Debug, Clone, Default, PartialEq)]
/// Jointly estimated ability and difficulty parameters for one test.
///
/// Both vectors are centered to mean zero for identifiability; the model is
/// otherwise invariant to shifting every ability and difficulty by the same
/// constant.
pub struct RaschEstimate {
    /// Latent ability per submission.
    pub theta_by_submission: HashMap<SubmissionId, f64>,
    /// Latent difficulty per objective item.
    pub difficulty_by_item:  HashMap<QuestionId, f64>,
}

/// Numerically stable logistic sigmoid.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Logit of a proportion already clamped away from 0 and 1.
fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Smoothed, clamped proportion-correct for `raw` successes out of `count`.
fn smoothed_proportion(raw: f64, count: f64) -> f64 {
    let p = (raw + PROX_ADJUSTMENT) / (count + 2.0 * PROX_ADJUSTMENT);
    p.clamp(PROPORTION_EPSILON, 1.0 - PROPORTION_EPSILON)
}

/// Mean of a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Subtracts `shift` from every value in place.
fn recenter(values: &mut [f64], shift: f64) {
    for value in values.iter_mut() {
        *value -= shift;
    }
}

/// PROX starting abilities: logit of each row's smoothed proportion-correct,
/// centered to mean zero.
fn prox_theta(matrix: &[Vec<bool>]) -> Vec<f64> {
    let k = matrix.first().map_or(1, |row| row.len().max(1)) as f64;
    let mut thetas: Vec<f64> = matrix
        .iter()
        .map(|row| {
            let raw = row.iter().filter(|&&correct| correct).count() as f64;
            logit(smoothed_proportion(raw, k))
        })
        .collect();
    let shift = mean(&thetas);
    recenter(&mut thetas, shift);
    thetas
}

/// PROX starting difficulties: reversed-sign logit of each column's smoothed
/// proportion-correct (difficulty grows as the proportion falls), centered
/// to mean zero.
fn prox_difficulty(matrix: &[Vec<bool>]) -> Vec<f64> {
    let n = matrix.len() as f64;
    let k = matrix.first().map_or(0, |row| row.len());
    let mut difficulties: Vec<f64> = (0..k)
        .map(|j| {
            let raw = matrix.iter().filter(|row| row[j]).count() as f64;
            -logit(smoothed_proportion(raw, n))
        })
        .collect();
    let shift = mean(&difficulties);
    recenter(&mut difficulties, shift);
    difficulties
}

/// Jointly estimates abilities and difficulties for a response matrix.
///
/// Runs `max_iterations` fixed Newton-Raphson passes over the PROX starting
/// values: abilities first with difficulties held fixed, then difficulties
/// against the just-updated abilities, re-centering both vectors on the mean
/// difficulty after each pass so the scale cannot drift. A parameter whose
/// Hessian falls below the floor (an all-correct or all-incorrect pattern)
/// keeps its current value for that pass. Empty inputs yield an empty
/// estimate.
pub fn estimate_rasch_1pl(
    submission_ids: &[SubmissionId],
    item_ids: &[QuestionId],
    matrix: &ResponseMatrix,
    max_iterations: usize,
) -> RaschEstimate {
    if submission_ids.is_empty() || item_ids.is_empty() || matrix.is_empty() {
        return RaschEstimate::default();
    }

    let n = submission_ids.len();
    let k = item_ids.len();
    let mut theta = prox_theta(matrix);
    let mut b = prox_difficulty(matrix);

    for _ in 0..max_iterations {
        for i in 0..n {
            let mut gradient = 0.0;
            let mut hessian = 0.0;
            for j in 0..k {
                let p = sigmoid(theta[i] - b[j]);
                let response = if matrix[i][j] { 1.0 } else { 0.0 };
                gradient += response - p;
                hessian += p * (1.0 - p);
            }
            if hessian > HESSIAN_FLOOR {
                theta[i] += gradient / hessian;
            }
        }

        for j in 0..k {
            let mut gradient = 0.0;
            let mut hessian = 0.0;
            for i in 0..n {
                let p = sigmoid(theta[i] - b[j]);
                let response = if matrix[i][j] { 1.0 } else { 0.0 };
                gradient += p - response;
                hessian += p * (1.0 - p);
            }
            if hessian > HESSIAN_FLOOR {
                b[j] += gradient / hessian;
            }
        }

        let shift = mean(&b);
        recenter(&mut b, shift);
        recenter(&mut theta, shift);
    }

    debug!(
        submissions = n,
        items = k,
        passes = max_iterations,
        "rasch estimation finished"
    );

    RaschEstimate {
        theta_by_submission: submission_ids.iter().copied().zip(theta).collect(),
        difficulty_by_item:  item_ids.iter().copied().zip(b).collect(),
    }
}

/// Maps a latent ability onto the 0-100 display scale.
pub fn theta_to_score_100(theta: f64) -> f64 {
    (100.0 * sigmoid(theta)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::sigmoid;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_halves_mirror() {
        let x = 1.7;
        assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
    }
}
