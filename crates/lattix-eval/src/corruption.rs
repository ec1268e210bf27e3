//! Column layout for subject and object corruption.
//!
//! Corrupting a fact keeps two of its columns and replaces the third with a
//! candidate entity:
//!
//! | Side | Kept columns | Corrupted column | Candidate fact |
//! |------|--------------|------------------|----------------|
//! | Subject | 1..3 (relation, object) | 0 | (e, r, o) |
//! | Object | 0..2 (subject, relation) | 2 | (s, r, e) |

use std::iter;
use std::ops::Range;

use crate::fact::{CorruptionSide, EntityId, Fact, OBJECT, SUBJECT};

/// How to split a fact into kept columns and a corrupted slot, and how to put
/// it back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorruptionStrategy {
    side: CorruptionSide,
}

impl CorruptionStrategy {
    /// Select the strategy for one corruption side.
    pub fn for_side(side: CorruptionSide) -> Self {
        Self { side }
    }

    pub fn side(&self) -> CorruptionSide {
        self.side
    }

    /// Offsets of the two columns copied unchanged into every candidate.
    pub fn keep_range(&self) -> Range<usize> {
        match self.side {
            CorruptionSide::Subject => 1..3,
            CorruptionSide::Object => 0..2,
        }
    }

    /// Offset of the column replaced by candidate entities.
    pub fn corrupt_offset(&self) -> usize {
        match self.side {
            CorruptionSide::Subject => SUBJECT,
            CorruptionSide::Object => OBJECT,
        }
    }

    /// The two kept columns of `fact`, in column order.
    pub fn kept_columns(&self, fact: &Fact) -> [EntityId; 2] {
        let cols = fact.to_array();
        let r = self.keep_range();
        [cols[r.start], cols[r.start + 1]]
    }

    /// The true value sitting in the corrupted slot of `fact`.
    pub fn corrupted_value(&self, fact: &Fact) -> EntityId {
        fact[self.corrupt_offset()]
    }

    /// Place one candidate entity and the kept columns in fact order.
    pub fn assemble_one(&self, candidate: EntityId, [a, b]: [EntityId; 2]) -> Fact {
        match self.side {
            CorruptionSide::Subject => Fact::new(candidate, a, b),
            CorruptionSide::Object => Fact::new(a, b, candidate),
        }
    }

    /// Pair every candidate with a copy of the kept columns and assemble the
    /// resulting facts, preserving candidate order.
    pub fn assemble<I>(&self, candidates: I, kept: [EntityId; 2]) -> Vec<Fact>
    where
        I: IntoIterator<Item = EntityId>,
    {
        candidates
            .into_iter()
            .zip(iter::repeat(kept))
            .map(|(e, kept)| self.assemble_one(e, kept))
            .collect()
    }
}

impl From<CorruptionSide> for CorruptionStrategy {
    fn from(side: CorruptionSide) -> Self {
        Self::for_side(side)
    }
}
