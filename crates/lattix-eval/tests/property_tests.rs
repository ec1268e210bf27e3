//! Property-based tests for raw rank evaluation.
//!
//! These tests verify invariants that should hold for any universe, fact, and
//! scorer:
//! - Candidate batch shape and true-entity exclusion
//! - Rank bounds and tie-break agreement with a stable argsort
//! - Metric pooling and hits@k extremes

use std::cmp::Ordering;

use lattix_eval::{
    generate, rank::score_order, rank_in_scores, CorruptionSide, Device, EntityId, EntityUniverse, Evaluator, Fact,
    Result,
};
use proptest::prelude::*;

/// Distinct, unsorted, possibly sparse entity ids.
fn arb_universe() -> impl Strategy<Value = Vec<EntityId>> {
    prop::collection::hash_set(0u64..10_000, 1..40).prop_map(|s| s.into_iter().collect())
}

/// A universe plus facts drawn from it.
fn arb_universe_and_facts() -> impl Strategy<Value = (Vec<EntityId>, Vec<Fact>)> {
    arb_universe().prop_flat_map(|u| {
        let n = u.len();
        let fact = (0..n, 0u64..5, 0..n);
        let facts = prop::collection::vec(fact, 1..8);
        (Just(u), facts)
    })
    .prop_map(|(u, idx)| {
        let facts = idx
            .into_iter()
            .map(|(s, r, o)| Fact::new(u[s], r, u[o]))
            .collect();
        (u, facts)
    })
}

fn arb_side() -> impl Strategy<Value = CorruptionSide> {
    prop_oneof![Just(CorruptionSide::Subject), Just(CorruptionSide::Object)]
}

/// Scores drawn from a small range so ties are common.
fn arb_scores() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec((0i32..6).prop_map(|v| v as f32), 0..50)
}

/// Deterministic pseudo-random scorer keyed on the fact.
fn hash_model(batch: &[Fact], _: &Device) -> Result<Vec<f32>> {
    Ok(batch
        .iter()
        .map(|f| {
            let h = f
                .subject
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .wrapping_add(f.relation.wrapping_mul(31))
                .wrapping_add(f.object.wrapping_mul(0xBF58_476D_1CE4_E5B9));
            (h % 7) as f32
        })
        .collect())
}

fn argsort_rank(candidates: &[f32], true_score: f32) -> usize {
    let mut all = candidates.to_vec();
    all.push(true_score);
    let mut idx: Vec<usize> = (0..all.len()).collect();
    idx.sort_by(|&i, &j| score_order(all[i], all[j]));
    idx.iter().position(|&i| i == all.len() - 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn batch_excludes_true_entity_and_has_n_minus_one(
        (ids, facts) in arb_universe_and_facts(),
        side in arb_side(),
    ) {
        let universe = EntityUniverse::new(ids).unwrap();
        for fact in &facts {
            let batch = generate(&universe, fact, side).unwrap();
            prop_assert_eq!(batch.len(), universe.len() - 1);

            for c in batch.iter() {
                match side {
                    CorruptionSide::Subject => {
                        prop_assert_ne!(c.subject, fact.subject);
                        prop_assert_eq!((c.relation, c.object), (fact.relation, fact.object));
                    }
                    CorruptionSide::Object => {
                        prop_assert_ne!(c.object, fact.object);
                        prop_assert_eq!((c.subject, c.relation), (fact.subject, fact.relation));
                    }
                }
            }
        }
    }

    #[test]
    fn rank_matches_stable_argsort(cands in arb_scores(), t in (0i32..6).prop_map(|v| v as f32)) {
        let r = rank_in_scores(&cands, t);
        prop_assert_eq!(r, argsort_rank(&cands, t));
        prop_assert!(r <= cands.len());
    }

    #[test]
    fn strict_min_is_zero_and_strict_max_is_last(cands in arb_scores()) {
        prop_assert_eq!(rank_in_scores(&cands, -1.0), 0);
        prop_assert_eq!(rank_in_scores(&cands, 100.0), cands.len());
    }

    #[test]
    fn ranks_are_bounded((ids, facts) in arb_universe_and_facts(), side in arb_side()) {
        let universe = EntityUniverse::new(ids).unwrap();
        let device = Device::cpu();
        let run = Evaluator::new(&universe, &hash_model, &device)
            .evaluate_side(&facts, side)
            .unwrap();

        prop_assert_eq!(run.ranks.len(), facts.len());
        for &r in &run.ranks {
            prop_assert!(r < universe.len());
        }
    }

    #[test]
    fn hits_at_k_extremes((ids, facts) in arb_universe_and_facts()) {
        let universe = EntityUniverse::new(ids).unwrap();
        let device = Device::cpu();
        let n = universe.len();

        let all = Evaluator::new(&universe, &hash_model, &device).with_k(n).hits_at_k(&facts).unwrap();
        prop_assert_eq!(all, 1.0);

        let none = Evaluator::new(&universe, &hash_model, &device).with_k(0).hits_at_k(&facts).unwrap();
        prop_assert_eq!(none, 0.0);
    }

    #[test]
    fn pooled_mean_is_mean_of_all_side_ranks(
        (ids, facts) in arb_universe_and_facts(),
        k in 0usize..12,
    ) {
        let universe = EntityUniverse::new(ids).unwrap();
        let device = Device::cpu();
        let eval = Evaluator::new(&universe, &hash_model, &device).with_k(k);

        let subj = eval.evaluate_side(&facts, CorruptionSide::Subject).unwrap();
        let obj = eval.evaluate_side(&facts, CorruptionSide::Object).unwrap();
        let all: Vec<usize> = subj.ranks.iter().chain(&obj.ranks).copied().collect();
        let manual_mr = all.iter().sum::<usize>() as f64 / all.len() as f64;
        let manual_hits = all.iter().filter(|&&r| r < k).count() as f64 / all.len() as f64;

        let (mr, hits) = eval.mean_rank_and_hits_at_k(&facts).unwrap();
        prop_assert!((mr - manual_mr).abs() < 1e-9);
        prop_assert!((hits - manual_hits).abs() < 1e-12);
        prop_assert_eq!(eval.mean_rank(&facts).unwrap(), mr);
        prop_assert_eq!(eval.hits_at_k(&facts).unwrap(), hits);
    }

    #[test]
    fn score_order_is_total_on_sampled_values(a in any::<f32>(), b in any::<f32>()) {
        let ab = score_order(a, b);
        let ba = score_order(b, a);
        prop_assert_eq!(ab, ba.reverse());
        if a.is_nan() && !b.is_nan() {
            prop_assert_eq!(ab, Ordering::Greater);
        }
    }
}
