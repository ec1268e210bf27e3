//! Raw rank-based evaluation of knowledge graph embedding models.
//!
//! Knowledge graphs store facts as (subject, relation, object) triples.
//! A trained KGE model assigns each triple a plausibility score. This crate
//! measures how well those scores separate true facts from corrupted ones.
//!
//! ## The Link Prediction Protocol
//!
//! For each held-out fact `(s, r, o)`:
//!
//! 1. **Subject corruption**: score `(e, r, o)` for every entity `e != s`
//! 2. **Object corruption**: score `(s, r, e)` for every entity `e != o`
//! 3. Score the true fact, append it after the candidates, and sort ascending.
//!    Its zero-based position is the **rank**.
//!
//! ```text
//!   universe = {0, 1, 2, 3, 4}, fact = (1, 0, 3), corrupt object
//!
//!   candidates   (1,0,0) (1,0,1) (1,0,2) (1,0,4) | (1,0,3)
//!   scores          5       2       1       4    |    3
//!   ascending       1       2       3*      4         5
//!                                   ^ rank 2
//! ```
//!
//! This is the **raw** setting: corrupted facts that are true elsewhere in
//! the graph still count as negatives. Relations are never corrupted.
//!
//! ## Score Convention
//!
//! **Lower scores are better.** Ranking is ascending. A model with a
//! "higher is better" score (TransE's `-||h + r - t||`, DistMult's
//! `<h, r, t>`) must negate it in its [`TripleScorer`] implementation.
//!
//! ## Ties
//!
//! Ties are broken by position: candidates come first, the true fact last,
//! and the sort is stable. A true fact tied with `m` candidates ranks after
//! all of them. See [`rank`] for details.
//!
//! ## Metrics
//!
//! | Metric | Definition |
//! |--------|------------|
//! | Mean rank | mean of zero-based ranks over all (fact, side) pairs |
//! | Hits@k | fraction of (fact, side) pairs with `rank < k` |
//!
//! ## Usage
//!
//! ```rust
//! use lattix_eval::{mean_rank_and_hits_at_k, Device, EntityUniverse, Fact, Result};
//!
//! let universe = EntityUniverse::dense(5)?;
//! let test_facts = vec![Fact::new(1, 0, 3), Fact::new(2, 0, 4)];
//!
//! // Any `Fn(&[Fact], &Device) -> Result<Vec<f32>>` is a scorer.
//! let model = |batch: &[Fact], _: &Device| -> Result<Vec<f32>> {
//!     Ok(batch.iter().map(|f| f.subject.abs_diff(f.object) as f32).collect())
//! };
//!
//! let (mr, hits) = mean_rank_and_hits_at_k(&universe, &model, &test_facts, &Device::cpu(), 10)?;
//! assert!(mr >= 0.0);
//! assert_eq!(hits, 1.0);
//! # Ok::<(), lattix_eval::Error>(())
//! ```
//!
//! ## References
//!
//! - Bordes et al. (2013). "Translating Embeddings for Modeling
//!   Multi-relational Data." NIPS.
//! - Ali et al. (2020). "Bringing Light Into the Dark: A Large-scale
//!   Evaluation of Knowledge Graph Embedding Models." (rank tie handling)

pub mod candidates;
pub mod config;
pub mod corruption;
mod error;
mod evaluator;
mod fact;
pub mod metrics;
pub mod observer;
pub mod rank;
mod scorer;

pub use candidates::{generate, CandidateBatch};
pub use config::{EvalConfig, SideSelection, DEFAULT_K};
pub use corruption::CorruptionStrategy;
pub use error::{Error, Result};
pub use evaluator::{hits_at_k, mean_rank, mean_rank_and_hits_at_k, Evaluator};
pub use fact::{CorruptionSide, EntityId, EntityUniverse, Fact, OBJECT, RELATION, SUBJECT};
pub use metrics::{MetricSummary, SideMetrics, SideRanks};
pub use observer::{EvalObserver, TracingObserver};
pub use rank::{rank_in_scores, RankOutcome};
pub use scorer::{Device, TripleScorer};
