//! Raw link prediction evaluation over a fact set.
//!
//! For every held-out fact and every selected side, the evaluator builds the
//! candidate batch, asks the scorer for candidate and true-fact scores, and
//! records the true fact's rank. Facts are processed one at a time; each
//! scorer call blocks until it returns.
//!
//! Any error (missing entity, malformed scores, scorer failure) aborts the
//! whole evaluation.

use std::time::Instant;

use crate::candidates;
use crate::config::{EvalConfig, SideSelection};
use crate::error::{Error, Result};
use crate::fact::{CorruptionSide, EntityUniverse, Fact};
use crate::metrics::{MetricSummary, SideRanks};
use crate::observer::{EvalObserver, TracingObserver};
use crate::rank::{self, RankOutcome};
use crate::scorer::{Device, TripleScorer};

/// Link prediction evaluator.
///
/// Borrows the universe, the scorer, and the device for the duration of the
/// evaluation; holds no state between calls.
///
/// # Example
///
/// ```rust
/// use lattix_eval::{Device, EntityUniverse, Evaluator, Fact, Result};
///
/// let universe = EntityUniverse::dense(5)?;
/// // Lower is better: prefer objects close to the subject id.
/// let model = |batch: &[Fact], _: &Device| -> Result<Vec<f32>> {
///     Ok(batch.iter().map(|f| (f.object as f32 - f.subject as f32).abs()).collect())
/// };
/// let device = Device::cpu();
///
/// let summary = Evaluator::new(&universe, &model, &device)
///     .with_k(3)
///     .evaluate(&[Fact::new(1, 0, 2)])?;
/// assert_eq!(summary.num_evaluations, 2);
/// # Ok::<(), lattix_eval::Error>(())
/// ```
pub struct Evaluator<'a, M: ?Sized, O = ()> {
    universe: &'a EntityUniverse,
    model: &'a M,
    device: &'a Device,
    config: EvalConfig,
    observer: O,
}

impl<'a, M> Evaluator<'a, M, ()>
where
    M: TripleScorer + ?Sized,
{
    /// Create an evaluator with the default config and no observer.
    pub fn new(universe: &'a EntityUniverse, model: &'a M, device: &'a Device) -> Self {
        Self {
            universe,
            model,
            device,
            config: EvalConfig::default(),
            observer: (),
        }
    }
}

impl<'a, M, O> Evaluator<'a, M, O>
where
    M: TripleScorer + ?Sized,
    O: EvalObserver,
{
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    /// Replace the observer.
    pub fn with_observer<P: EvalObserver>(self, observer: P) -> Evaluator<'a, M, P> {
        Evaluator {
            universe: self.universe,
            model: self.model,
            device: self.device,
            config: self.config,
            observer,
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Rank a single fact corrupted on `side`.
    pub fn rank_fact(&self, fact: &Fact, side: CorruptionSide) -> Result<RankOutcome> {
        let batch = candidates::generate(self.universe, fact, side)?;
        rank::rank(self.model, fact, &batch, self.device, self.config.k)
    }

    /// Rank every fact on one side.
    pub fn evaluate_side(&self, facts: &[Fact], side: CorruptionSide) -> Result<SideRanks> {
        if facts.is_empty() {
            return Err(Error::EmptyFactSet);
        }
        let start = Instant::now();
        self.observer.on_side_start(side, facts.len());

        let mut run = SideRanks::new(side, self.config.k);
        run.ranks.reserve(facts.len());
        for (i, fact) in facts.iter().enumerate() {
            let outcome = self.rank_fact(fact, side)?;
            self.observer.on_fact_ranked(side, i, fact, &outcome);
            run.push(outcome.rank, outcome.hit);
        }

        self.observer.on_side_finish(&run, start.elapsed());
        Ok(run)
    }

    /// Evaluate the configured sides and pool their ranks.
    pub fn evaluate(&self, facts: &[Fact]) -> Result<MetricSummary> {
        self.evaluate_sides(facts, self.config.sides)
    }

    fn evaluate_sides(&self, facts: &[Fact], selection: SideSelection) -> Result<MetricSummary> {
        if facts.is_empty() {
            return Err(Error::EmptyFactSet);
        }
        let start = Instant::now();
        let sides = selection.sides();
        self.observer.on_evaluation_start(facts.len(), sides);

        let runs = sides
            .iter()
            .map(|&side| self.evaluate_side(facts, side))
            .collect::<Result<Vec<_>>>()?;
        let summary = MetricSummary::pooled(&runs)?;

        self.observer.on_evaluation_finish(&summary, start.elapsed());
        Ok(summary)
    }

    /// Mean rank and hits@k pooled over subject and object corruption.
    ///
    /// Always evaluates both sides, whatever the configured selection.
    pub fn mean_rank_and_hits_at_k(&self, facts: &[Fact]) -> Result<(f64, f64)> {
        let s = self.evaluate_sides(facts, SideSelection::Both)?;
        Ok((s.mean_rank, s.hits_at_k))
    }

    /// Mean rank pooled over subject and object corruption.
    pub fn mean_rank(&self, facts: &[Fact]) -> Result<f64> {
        self.mean_rank_and_hits_at_k(facts).map(|(mr, _)| mr)
    }

    /// Hits@k pooled over subject and object corruption.
    pub fn hits_at_k(&self, facts: &[Fact]) -> Result<f64> {
        self.mean_rank_and_hits_at_k(facts).map(|(_, hits)| hits)
    }
}

#[cfg(feature = "parallel")]
impl<'a, M, O> Evaluator<'a, M, O>
where
    M: TripleScorer + Sync + ?Sized,
    O: EvalObserver + Sync,
{
    /// [`evaluate_side`](Self::evaluate_side) with facts ranked on the rayon
    /// pool.
    ///
    /// Ranks come back in fact order, so the result equals the sequential
    /// one. `on_fact_ranked` may be called from several threads and out of
    /// order.
    pub fn evaluate_side_par(&self, facts: &[Fact], side: CorruptionSide) -> Result<SideRanks> {
        use rayon::prelude::*;

        if facts.is_empty() {
            return Err(Error::EmptyFactSet);
        }
        let start = Instant::now();
        self.observer.on_side_start(side, facts.len());

        let outcomes: Vec<RankOutcome> = facts
            .par_iter()
            .enumerate()
            .map(|(i, fact)| {
                let outcome = self.rank_fact(fact, side)?;
                self.observer.on_fact_ranked(side, i, fact, &outcome);
                Ok(outcome)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut run = SideRanks::new(side, self.config.k);
        run.ranks.reserve(outcomes.len());
        for o in outcomes {
            run.push(o.rank, o.hit);
        }

        self.observer.on_side_finish(&run, start.elapsed());
        Ok(run)
    }
}

/// Mean rank and hits@k over both corruption sides.
///
/// Ranks from subject and object corruption are pooled for the mean; hits
/// from both sides are divided by `2 * facts.len()`. Progress and timing are
/// reported through [`TracingObserver`].
pub fn mean_rank_and_hits_at_k<M>(
    universe: &EntityUniverse,
    model: &M,
    facts: &[Fact],
    device: &Device,
    k: usize,
) -> Result<(f64, f64)>
where
    M: TripleScorer + ?Sized,
{
    Evaluator::new(universe, model, device)
        .with_k(k)
        .with_observer(TracingObserver)
        .mean_rank_and_hits_at_k(facts)
}

/// Mean rank over both corruption sides.
pub fn mean_rank<M>(universe: &EntityUniverse, model: &M, facts: &[Fact], device: &Device) -> Result<f64>
where
    M: TripleScorer + ?Sized,
{
    Evaluator::new(universe, model, device)
        .with_observer(TracingObserver)
        .mean_rank(facts)
}

/// Hits@k over both corruption sides.
pub fn hits_at_k<M>(
    universe: &EntityUniverse,
    model: &M,
    facts: &[Fact],
    device: &Device,
    k: usize,
) -> Result<f64>
where
    M: TripleScorer + ?Sized,
{
    Evaluator::new(universe, model, device)
        .with_k(k)
        .with_observer(TracingObserver)
        .hits_at_k(facts)
}
