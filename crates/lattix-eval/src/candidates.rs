//! Candidate batches for one held-out fact.
//!
//! This is the raw setting: every entity except the true one is a negative,
//! including corruptions that happen to be true facts elsewhere in the graph.

use std::ops::Deref;

use crate::corruption::CorruptionStrategy;
use crate::error::{Error, Result};
use crate::fact::{CorruptionSide, EntityId, EntityUniverse, Fact};

/// All corruptions of one fact on one side.
///
/// Holds exactly `universe.len() - 1` facts, in universe order, none of which
/// carries the true entity in the corrupted slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBatch {
    side: CorruptionSide,
    excluded: EntityId,
    facts: Vec<Fact>,
}

impl CandidateBatch {
    pub fn side(&self) -> CorruptionSide {
        self.side
    }

    /// The true entity left out of the batch.
    pub fn excluded(&self) -> EntityId {
        self.excluded
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn into_facts(self) -> Vec<Fact> {
        self.facts
    }
}

impl Deref for CandidateBatch {
    type Target = [Fact];

    fn deref(&self) -> &[Fact] {
        &self.facts
    }
}

/// Build the candidate batch for `fact` corrupted on `side`.
///
/// The true entity is removed by value, so the universe may be sparse or
/// unordered.
pub fn generate(universe: &EntityUniverse, fact: &Fact, side: CorruptionSide) -> Result<CandidateBatch> {
    let strategy = CorruptionStrategy::for_side(side);
    let excluded = strategy.corrupted_value(fact);
    if !universe.contains(excluded) {
        return Err(Error::EntityNotInUniverse {
            entity: excluded,
            side,
        });
    }

    let candidates = universe.iter().filter(|&e| e != excluded);
    let facts = strategy.assemble(candidates, strategy.kept_columns(fact));
    debug_assert_eq!(facts.len(), universe.len() - 1);

    Ok(CandidateBatch {
        side,
        excluded,
        facts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_corruption_scenario() {
        let universe = EntityUniverse::dense(5).unwrap();
        let batch = generate(&universe, &Fact::new(1, 0, 3), CorruptionSide::Object).unwrap();

        assert_eq!(
            batch.facts(),
            &[
                Fact::new(1, 0, 0),
                Fact::new(1, 0, 1),
                Fact::new(1, 0, 2),
                Fact::new(1, 0, 4),
            ]
        );
        assert_eq!(batch.excluded(), 3);
        assert_eq!(batch.side(), CorruptionSide::Object);
    }

    #[test]
    fn test_subject_corruption_keeps_relation_and_object() {
        let universe = EntityUniverse::dense(5).unwrap();
        let batch = generate(&universe, &Fact::new(1, 0, 3), CorruptionSide::Subject).unwrap();

        assert_eq!(batch.len(), 4);
        assert!(batch.iter().all(|f| f.relation == 0 && f.object == 3));
        assert!(batch.iter().all(|f| f.subject != 1));
        // the subject slot may hold the object's id; only the true subject is excluded
        assert!(batch.contains(&Fact::new(3, 0, 3)));
    }

    #[test]
    fn test_sparse_universe_excludes_by_value() {
        // With offset-based deletion, removing "entity 2" would drop 30 here.
        let universe = EntityUniverse::new(vec![10, 20, 30, 2, 50]).unwrap();
        let batch = generate(&universe, &Fact::new(7, 1, 2), CorruptionSide::Object).unwrap();

        let objects: Vec<EntityId> = batch.iter().map(|f| f.object).collect();
        assert_eq!(objects, vec![10, 20, 30, 50]);
    }

    #[test]
    fn test_missing_entity_is_rejected() {
        let universe = EntityUniverse::dense(3).unwrap();
        let err = generate(&universe, &Fact::new(9, 0, 1), CorruptionSide::Subject).unwrap_err();
        assert!(matches!(
            err,
            Error::EntityNotInUniverse {
                entity: 9,
                side: CorruptionSide::Subject
            }
        ));
    }

    #[test]
    fn test_singleton_universe_gives_empty_batch() {
        let universe = EntityUniverse::new(vec![5]).unwrap();
        let batch = generate(&universe, &Fact::new(5, 0, 5), CorruptionSide::Object).unwrap();
        assert!(batch.is_empty());
    }
}
