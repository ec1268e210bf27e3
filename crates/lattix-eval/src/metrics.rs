//! Mean rank and hits@k.
//!
//! # Conventions
//!
//! | Metric | Range | Definition |
//! |--------|-------|------------|
//! | MR | [0, n-1] | mean of zero-based ranks |
//! | Hits@k | [0, 1] | fraction of ranks with `rank < k` |
//!
//! Ranks are zero-based, so MR here is one less than the one-based MR most
//! benchmark tables report. No reciprocal-rank metric is computed.
//!
//! When both sides are evaluated, subject and object ranks are pooled into a
//! single population: MR is the mean over `2 * |facts|` ranks and Hits@k
//! divides the hit count by `2 * |facts|`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fact::CorruptionSide;

/// Raw per-fact ranks for one corruption side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideRanks {
    /// Side the facts were corrupted on.
    pub side: CorruptionSide,
    /// Hits@k cut-off `hits` was counted with.
    pub k: usize,
    /// Zero-based rank of each fact, in fact order.
    pub ranks: Vec<usize>,
    /// Number of ranks below `k`.
    pub hits: usize,
}

impl SideRanks {
    /// Start an empty run.
    pub fn new(side: CorruptionSide, k: usize) -> Self {
        Self {
            side,
            k,
            ranks: Vec::new(),
            hits: 0,
        }
    }

    /// Build from precomputed ranks, counting hits against `k`.
    pub fn from_ranks(side: CorruptionSide, k: usize, ranks: Vec<usize>) -> Self {
        let hits = ranks.iter().filter(|&&r| r < k).count();
        Self { side, k, ranks, hits }
    }

    /// Record one fact.
    pub fn push(&mut self, rank: usize, hit: bool) {
        self.ranks.push(rank);
        if hit {
            self.hits += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    fn rank_sum(&self) -> f64 {
        self.ranks.iter().map(|&r| r as f64).sum()
    }

    /// Mean rank and hits@k for this side alone.
    pub fn metrics(&self) -> Result<SideMetrics> {
        if self.ranks.is_empty() {
            return Err(Error::EmptyFactSet);
        }
        let n = self.ranks.len() as f64;
        Ok(SideMetrics {
            side: self.side,
            mean_rank: self.rank_sum() / n,
            hits_at_k: self.hits as f64 / n,
            num_facts: self.ranks.len(),
        })
    }
}

/// Metrics for one corruption side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideMetrics {
    pub side: CorruptionSide,
    /// Mean zero-based rank.
    pub mean_rank: f64,
    /// Fraction of facts with rank < k.
    pub hits_at_k: f64,
    /// Number of facts evaluated on this side.
    pub num_facts: usize,
}

/// Evaluation result pooled over all evaluated sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Mean zero-based rank over every (fact, side) evaluation.
    pub mean_rank: f64,
    /// Hits / number of (fact, side) evaluations.
    pub hits_at_k: f64,
    /// Hits@k cut-off.
    pub k: usize,
    /// Number of (fact, side) evaluations.
    pub num_evaluations: usize,
    /// Per-side breakdown, in evaluation order.
    pub sides: Vec<SideMetrics>,
}

impl MetricSummary {
    /// Pool side runs into one summary.
    ///
    /// All runs must share the same `k` and be non-empty. The result does not
    /// depend on the order of `runs` beyond the order of `sides`.
    pub fn pooled(runs: &[SideRanks]) -> Result<Self> {
        let first = runs.first().ok_or(Error::EmptyFactSet)?;
        let k = first.k;
        if let Some(other) = runs.iter().find(|r| r.k != k) {
            return Err(Error::MixedCutoff(k, other.k));
        }

        let sides = runs.iter().map(SideRanks::metrics).collect::<Result<Vec<_>>>()?;

        let total: usize = runs.iter().map(SideRanks::len).sum();
        let rank_sum: f64 = runs.iter().map(SideRanks::rank_sum).sum();
        let hits: usize = runs.iter().map(|r| r.hits).sum();
        let n = total as f64;

        Ok(Self {
            mean_rank: rank_sum / n,
            hits_at_k: hits as f64 / n,
            k,
            num_evaluations: total,
            sides,
        })
    }

    /// Metrics for one side, if it was evaluated.
    pub fn side(&self, side: CorruptionSide) -> Option<&SideMetrics> {
        self.sides.iter().find(|m| m.side == side)
    }

    /// Format as summary string.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "MR: {:.2} | H@{}: {:.3} (n={})",
            self.mean_rank, self.k, self.hits_at_k, self.num_evaluations
        );
        for m in &self.sides {
            out.push_str(&format!(
                " | {} MR: {:.2} H@{}: {:.3}",
                m.side, m.mean_rank, self.k, m.hits_at_k
            ));
        }
        out
    }
}
