//! Rank of a true fact among its corruptions.
//!
//! Scores are ranked ascending (lower = more plausible). The true fact's
//! score is appended after all candidate scores and the combined array is
//! stable-sorted; the rank is the zero-based position the true fact lands on.
//!
//! # Tie-break
//!
//! A stable sort keeps tied entries in their original order, and the true
//! fact is always last. On a tie the true fact therefore ranks *after* every
//! tied candidate:
//!
//! ```text
//! candidates = [2, 2], true = 2   ->   [2, 2, 2*]   ->   rank 2
//! ```
//!
//! This is the pessimistic rank, and it is what makes results comparable
//! across implementations.
//!
//! The sorted position of the last element is exactly the number of
//! candidates that do not sort after it, so no sort is performed.

use std::cmp::Ordering;

use crate::candidates::CandidateBatch;
use crate::error::{Error, Result};
use crate::fact::Fact;
use crate::scorer::{Device, TripleScorer};

/// Per-fact ranking result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOutcome {
    /// Zero-based rank; 0 is best.
    pub rank: usize,
    /// Whether `rank < k`.
    pub hit: bool,
}

/// Ascending score order used for ranking.
///
/// NaN sorts after every number and ties with other NaNs.
pub fn score_order(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Zero-based rank of `true_score` appended after `candidate_scores`.
pub fn rank_in_scores(candidate_scores: &[f32], true_score: f32) -> usize {
    candidate_scores
        .iter()
        .filter(|&&s| score_order(s, true_score) != Ordering::Greater)
        .count()
}

/// Score `batch` and the true `fact`, and rank the true fact.
///
/// The scorer is called twice: once with the whole batch, once with the true
/// fact alone. Scorer errors are returned as-is.
pub fn rank<M>(model: &M, fact: &Fact, batch: &CandidateBatch, device: &Device, k: usize) -> Result<RankOutcome>
where
    M: TripleScorer + ?Sized,
{
    let candidate_scores = predict_checked(model, batch.facts(), device)?;
    let true_score = predict_checked(model, std::slice::from_ref(fact), device)?[0];

    let rank = rank_in_scores(&candidate_scores, true_score);
    Ok(RankOutcome { rank, hit: rank < k })
}

fn predict_checked<M>(model: &M, batch: &[Fact], device: &Device) -> Result<Vec<f32>>
where
    M: TripleScorer + ?Sized,
{
    let scores = model.predict(batch, device)?;
    if scores.len() != batch.len() {
        return Err(Error::ScoreCountMismatch {
            expected: batch.len(),
            actual: scores.len(),
        });
    }
    Ok(scores)
}
