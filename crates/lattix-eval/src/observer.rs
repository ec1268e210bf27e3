//! Progress and timing hooks.
//!
//! The evaluator reports what it is doing through an [`EvalObserver`] passed
//! in by the caller. `()` ignores everything; [`TracingObserver`] forwards to
//! `tracing`. Nothing here installs a subscriber.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::fact::{CorruptionSide, Fact};
use crate::metrics::{MetricSummary, SideRanks};
use crate::rank::RankOutcome;

/// Callbacks invoked around an evaluation.
///
/// All methods default to no-ops. Observers are shared by reference, so any
/// state they keep needs interior mutability.
pub trait EvalObserver {
    /// Before the first fact is scored.
    fn on_evaluation_start(&self, _num_facts: usize, _sides: &[CorruptionSide]) {}

    /// Before the first fact of `side` is scored.
    fn on_side_start(&self, _side: CorruptionSide, _num_facts: usize) {}

    /// After each fact is ranked.
    fn on_fact_ranked(&self, _side: CorruptionSide, _index: usize, _fact: &Fact, _outcome: &RankOutcome) {}

    /// After every fact of one side is ranked.
    fn on_side_finish(&self, _run: &SideRanks, _elapsed: Duration) {}

    /// After metrics are pooled. Not called when the evaluation fails.
    fn on_evaluation_finish(&self, _summary: &MetricSummary, _elapsed: Duration) {}
}

impl EvalObserver for () {}

impl<O: EvalObserver + ?Sized> EvalObserver for &O {
    fn on_evaluation_start(&self, num_facts: usize, sides: &[CorruptionSide]) {
        (**self).on_evaluation_start(num_facts, sides)
    }

    fn on_side_start(&self, side: CorruptionSide, num_facts: usize) {
        (**self).on_side_start(side, num_facts)
    }

    fn on_fact_ranked(&self, side: CorruptionSide, index: usize, fact: &Fact, outcome: &RankOutcome) {
        (**self).on_fact_ranked(side, index, fact, outcome)
    }

    fn on_side_finish(&self, run: &SideRanks, elapsed: Duration) {
        (**self).on_side_finish(run, elapsed)
    }

    fn on_evaluation_finish(&self, summary: &MetricSummary, elapsed: Duration) {
        (**self).on_evaluation_finish(summary, elapsed)
    }
}

/// Logs evaluation progress and timing through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EvalObserver for TracingObserver {
    fn on_evaluation_start(&self, num_facts: usize, sides: &[CorruptionSide]) {
        debug!(num_facts, num_sides = sides.len(), "Starting rank evaluation");
    }

    fn on_side_start(&self, side: CorruptionSide, num_facts: usize) {
        debug!(%side, num_facts, "Corrupting {} slot", side);
    }

    fn on_fact_ranked(&self, side: CorruptionSide, index: usize, fact: &Fact, outcome: &RankOutcome) {
        trace!(%side, index, %fact, rank = outcome.rank, hit = outcome.hit, "Ranked fact");
    }

    fn on_side_finish(&self, run: &SideRanks, elapsed: Duration) {
        let hits_at_k = if run.is_empty() {
            0.0
        } else {
            run.hits as f64 / run.len() as f64
        };
        info!(
            side = %run.side,
            k = run.k,
            hits_at_k,
            "{}-based hits@{}: {:.4} ({:?})",
            run.side,
            run.k,
            hits_at_k,
            elapsed
        );
    }

    fn on_evaluation_finish(&self, summary: &MetricSummary, elapsed: Duration) {
        info!(
            mean_rank = summary.mean_rank,
            hits_at_k = summary.hits_at_k,
            "Evaluation took {:.0} seconds",
            elapsed.as_secs_f64()
        );
    }
}
